use crate::core::aggregate::AggregationEngine;
use crate::core::calculator::day::day_timeline;
use crate::core::clock::Clock;
use crate::core::rules::LedgerRules;
use crate::db::pool::DbPool;
use crate::db::queries::load_ledger;
use crate::errors::AppResult;
use crate::models::ledger::Ledger;
use crate::models::summary::{BalanceReport, DaySource, DayView, MonthRecord, WeekView};
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, YELLOW, color_for_balance, colorize_in_out, colorize_optional};
use crate::utils::date::{month_name, weekday_short};
use crate::utils::formatting::{bold, mins2readable, mins2readable_est};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Read-only views over the whole ledger.
pub struct ReportLogic;

fn colored_balance(mins: i64, estimate: bool) -> String {
    format!(
        "{}{}{}",
        color_for_balance(mins),
        mins2readable_est(mins, true, estimate),
        RESET
    )
}

fn source_note(view: &DayView) -> &'static str {
    match view.source {
        DaySource::Recorded if view.open => "open",
        DaySource::Recorded => "",
        DaySource::Synthesized => "no record (credited)",
        DaySource::Pending => "not yet recorded",
        DaySource::Off => "-",
    }
}

fn status_cell(view: &DayView) -> String {
    colorize_optional(view.status.as_str())
}

fn optional_minutes(value: Option<i64>, estimate: bool) -> String {
    match value {
        Some(m) => mins2readable_est(m, false, estimate),
        None => colorize_optional("--:--"),
    }
}

fn optional_balance(value: Option<i64>, estimate: bool) -> String {
    match value {
        Some(m) => colored_balance(m, estimate),
        None => colorize_optional("--:--"),
    }
}

fn blocks_cell(view: &DayView) -> String {
    if view.blocks.is_empty() {
        return colorize_optional("-");
    }
    view.blocks
        .iter()
        .map(|b| {
            format!(
                "{}-{}",
                colorize_in_out(&b.arrival_str(), true),
                colorize_in_out(&b.departure_str(), false)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn day_row(view: &DayView) -> Vec<String> {
    vec![
        format!("{} {}", weekday_short(&view.date), view.date.format("%Y-%m-%d")),
        status_cell(view),
        blocks_cell(view),
        optional_minutes(view.total_minutes, view.estimate),
        mins2readable(view.expected_minutes, false, false),
        optional_balance(view.balance_minutes, view.estimate),
        format!("{GREY}{}{RESET}", source_note(view)),
    ]
}

fn day_columns() -> Vec<Column> {
    vec![
        Column::left("Date"),
        Column::left("Status"),
        Column::left("Stamps"),
        Column::right("Total"),
        Column::right("Expected"),
        Column::right("Balance"),
        Column::left(""),
    ]
}

impl ReportLogic {
    pub fn load(pool: &DbPool) -> AppResult<Ledger> {
        load_ledger(&pool.conn, None, None)
    }

    /// Single day with live estimate.
    pub fn status(ledger: &Ledger, rules: &LedgerRules, clock: &dyn Clock, date: NaiveDate) -> DayView {
        let engine = AggregationEngine::new(rules, clock);
        let view = engine.day_view(ledger, date, true);

        header(format!("{} {}", weekday_short(&date), date.format("%Y-%m-%d")));

        if view.source != DaySource::Recorded {
            println!("{}", source_note(&view));
            println!(
                "Expected: {}",
                mins2readable(view.expected_minutes, false, false)
            );
            return view;
        }

        if let Some(record) = ledger.recorded(&date) {
            println!("Status: {}", bold(view.status.as_str()));
            for (i, b) in view.blocks.iter().enumerate() {
                println!(
                    "  #{:<2} {} → {}",
                    i + 1,
                    colorize_in_out(&b.arrival_str(), true),
                    colorize_in_out(&b.departure_str(), false)
                );
            }
            let gaps = day_timeline(record, rules, None).gaps;
            for g in gaps {
                println!(
                    "  {GREY}break {}-{} ({}){RESET}",
                    g.start.format("%H:%M"),
                    g.end.format("%H:%M"),
                    mins2readable(g.duration_minutes, false, false)
                );
            }
        }

        println!(
            "Total:    {}",
            optional_minutes(view.total_minutes, view.estimate)
        );
        println!(
            "Expected: {}",
            mins2readable(view.expected_minutes, false, false)
        );
        println!(
            "Balance:  {}",
            optional_balance(view.balance_minutes, view.estimate)
        );
        if view.estimate {
            println!("{YELLOW}~ estimate: open entry closed at the current time{RESET}");
        }
        view
    }

    pub fn week(
        ledger: &Ledger,
        rules: &LedgerRules,
        clock: &dyn Clock,
        anchor: NaiveDate,
    ) -> AppResult<WeekView> {
        let engine = AggregationEngine::new(rules, clock);
        let week = engine.week_view(ledger, anchor)?;

        header(format!(
            "Week of {} (today {})",
            week.monday.format("%Y-%m-%d"),
            week.today.format("%Y-%m-%d")
        ));

        let mut table = Table::new(day_columns());
        for view in &week.days {
            table.add_row(day_row(view));
        }
        table.add_separator();
        table.add_row(vec![
            bold("Week"),
            String::new(),
            String::new(),
            mins2readable_est(week.total_minutes, false, week.estimate),
            mins2readable(week.expected_minutes, false, false),
            colored_balance(week.balance_minutes, week.estimate),
            format!(
                "{GREY}planned {}{RESET}",
                mins2readable(week.planned_minutes, false, false)
            ),
        ]);
        print!("{}", table.render());

        Ok(week)
    }

    pub fn balance(
        ledger: &Ledger,
        rules: &LedgerRules,
        clock: &dyn Clock,
        as_of: NaiveDate,
    ) -> AppResult<BalanceReport> {
        let engine = AggregationEngine::new(rules, clock);
        let report = engine.balance(ledger, as_of)?;

        println!(
            "Balance through {}: {}",
            report.through.format("%Y-%m-%d"),
            colored_balance(report.balance_minutes, false)
        );
        Ok(report)
    }

    pub fn month(
        ledger: &Ledger,
        rules: &LedgerRules,
        clock: &dyn Clock,
        year: i32,
        month: u32,
    ) -> AppResult<MonthRecord> {
        let engine = AggregationEngine::new(rules, clock);
        let record = engine.month_in_year(ledger, year, month)?;

        header(format!("{} {}", month_name(month), year));

        let mut table = Table::new(day_columns());
        for view in &record.days {
            table.add_row(day_row(view));
        }
        table.add_separator();
        for row in summary_rows(&record) {
            table.add_row(row);
        }
        print!("{}", table.render());

        Ok(record)
    }
}

fn summary_rows(record: &MonthRecord) -> Vec<Vec<String>> {
    let blank = || String::new();
    vec![
        vec![
            bold("Total"),
            blank(),
            blank(),
            mins2readable_est(record.total_minutes, false, record.estimate),
            mins2readable(record.expected_minutes, false, false),
            colored_balance(record.balance_minutes, record.estimate),
            blank(),
        ],
        vec![
            bold("Carry-over"),
            blank(),
            blank(),
            blank(),
            blank(),
            colored_balance(record.carry_in_minutes, false),
            blank(),
        ],
        vec![
            bold("Cumulative"),
            blank(),
            blank(),
            blank(),
            blank(),
            colored_balance(record.cumulative_minutes, record.estimate),
            blank(),
        ],
    ]
}
