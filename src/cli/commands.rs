//! Shell command handlers; each one calls a single `LedgerStore` operation.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandForm};
use crate::core::RevealOutcome;
use crate::currency::format_money;
use crate::ledger::{Record, RecordKey};

const TABLE_HEADERS: [&str; 4] = ["#", "Date", "Description", "Amount"];

const fn form(usage: &'static str, effect: &'static str) -> CommandForm {
    CommandForm { usage, effect }
}

const ADD_FORMS: &[CommandForm] = &[
    form(
        "add in <amount> <description...>",
        "cash received, e.g. `add in 1000 Salary`",
    ),
    form(
        "add out <amount> <description...>",
        "cash spent, e.g. `add out 250.50 Groceries`",
    ),
];

const LIST_FORMS: &[CommandForm] = &[form("list", "every record in entry order, numbered")];

const SEARCH_FORMS: &[CommandForm] = &[form(
    "search [term...]",
    "case-insensitive match on description, date, or `in`/`out`",
)];

const DELETE_FORMS: &[CommandForm] = &[
    form("delete <number>", "the row numbered by `list`"),
    form(
        "delete <date> <description> <amount>",
        "the first row shown with these values, e.g. `delete 2024-03-10 Groceries -250.50`",
    ),
];

const SUMMARY_FORMS: &[CommandForm] = &[form(
    "summary",
    "cash in, cash out, net; per day and per month",
)];

const FOLDER_FORMS: &[CommandForm] = &[form(
    "folder",
    "opens it, or prints its path when no opener runs",
)];

const HELP_FORMS: &[CommandForm] = &[
    form("help", "all commands"),
    form("help <command>", "the forms one command accepts"),
];

const EXIT_FORMS: &[CommandForm] = &[form("exit", "leave; every change is already saved")];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry {
            name: "add",
            aliases: &[],
            summary: "Record income or an expense dated today",
            forms: ADD_FORMS,
            handler: cmd_add,
        },
        CommandEntry {
            name: "list",
            aliases: &["ls"],
            summary: "Show the transaction history",
            forms: LIST_FORMS,
            handler: cmd_list,
        },
        CommandEntry {
            name: "search",
            aliases: &["find"],
            summary: "Filter by description, date, or type",
            forms: SEARCH_FORMS,
            handler: cmd_search,
        },
        CommandEntry {
            name: "delete",
            aliases: &["rm"],
            summary: "Delete one transaction",
            forms: DELETE_FORMS,
            handler: cmd_delete,
        },
        CommandEntry {
            name: "summary",
            aliases: &[],
            summary: "Show totals with daily and monthly summaries",
            forms: SUMMARY_FORMS,
            handler: cmd_summary,
        },
        CommandEntry {
            name: "folder",
            aliases: &[],
            summary: "Open the folder holding the ledger file",
            forms: FOLDER_FORMS,
            handler: cmd_folder,
        },
        CommandEntry {
            name: "help",
            aliases: &[],
            summary: "Show available commands",
            forms: HELP_FORMS,
            handler: cmd_help,
        },
        CommandEntry {
            name: "exit",
            aliases: &["quit"],
            summary: "Exit the shell",
            forms: EXIT_FORMS,
            handler: cmd_exit,
        },
    ]
}

fn usage_error(context: &ShellContext, name: &str) -> CommandError {
    let usage = context
        .command(name)
        .map(CommandEntry::usage_line)
        .unwrap_or_else(|| name.to_string());
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, description @ ..] = args else {
        return Err(usage_error(context, "add"));
    };
    let description = description.join(" ");
    let record = context.store.add(&description, kind, amount)?;
    output::success("Transaction saved successfully!");
    print_records(context, &[&record]);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records: Vec<&Record> = context.store.records().iter().collect();
    if records.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    output::section("Transaction history");
    print_records(context, &records);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let term = args.join(" ");
    let found = context.store.search(&term);
    if found.is_empty() {
        output::info("No transactions found matching your search.");
        return Ok(());
    }
    if !term.trim().is_empty() {
        output::section(format!("Results for `{}`", term.trim()));
    }
    print_records(context, &found);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [number] => {
            let position: usize = number
                .parse()
                .map_err(|_| usage_error(context, "delete"))?;
            let record = position
                .checked_sub(1)
                .and_then(|index| context.store.records().get(index))
                .cloned()
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("No transaction #{position}."))
                })?;
            if !confirm_delete(context, &record)? {
                return Ok(());
            }
            if context.store.remove_by_id(record.id())?.is_some() {
                output::success("Transaction removed successfully.");
            }
            Ok(())
        }
        [date, description, amount] => {
            let key = RecordKey::new(*date, *description, *amount);
            let Some(record) = context
                .store
                .records()
                .iter()
                .find(|record| key.matches(record))
                .cloned()
            else {
                output::warning("No matching transaction found.");
                return Ok(());
            };
            if !confirm_delete(context, &record)? {
                return Ok(());
            }
            if context.store.remove(&key)? {
                output::success("Transaction removed successfully.");
            }
            Ok(())
        }
        _ => Err(usage_error(context, "delete")),
    }
}

fn confirm_delete(context: &ShellContext, record: &Record) -> Result<bool, CommandError> {
    let prompt = format!(
        "Delete this transaction? {} {}",
        record.description(),
        record.signed_display()
    );
    context.confirm(&prompt)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.store.summary();
    if summary.is_empty() {
        output::info("No transaction data available.");
        return Ok(());
    }
    let symbol = context.config.currency_symbol.as_str();

    output::section("Financial summary");
    output::info(format!(
        "Total Cash In: {}",
        format_money(symbol, summary.totals.income_total)
    ));
    output::info(format!(
        "Total Cash Out: {}",
        format_money(symbol, summary.totals.expense_total)
    ));
    output::info(format!(
        "Net Balance: {}",
        format_money(symbol, summary.totals.net)
    ));

    output::section("Daily summary");
    for (date, amount) in &summary.daily {
        output::info(format!("{}: {}", date, format_money(symbol, *amount)));
    }

    output::section("Monthly summary");
    for (month, amount) in &summary.monthly {
        output::info(format!("{}: {}", month.label(), format_money(symbol, *amount)));
    }
    Ok(())
}

fn cmd_folder(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context
        .store
        .reveal_storage_location(context.config.opener.as_deref())
    {
        RevealOutcome::Opened(path) => {
            output::success(format!("Opened {}", path.display()));
        }
        RevealOutcome::Reported(path) => {
            output::info(format!("Transaction folder: {}", path.display()));
        }
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        print_overview(context);
        return Ok(());
    };
    match context.command(&name.to_lowercase()) {
        Some(entry) => print_command(entry),
        None => context.suggest_command(name),
    }
    Ok(())
}

fn print_overview(context: &ShellContext) {
    output::section("Available commands");
    for entry in context.registry.entries() {
        let aliases = if entry.aliases.is_empty() {
            String::new()
        } else {
            format!("({})", entry.aliases.join(", "))
        };
        output::info(format!("  {:<8} {:<8} {}", entry.name, aliases, entry.summary));
    }
    output::info("Use `help <command>` for the forms a command accepts.");
}

fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(entry.summary);
    for form in entry.forms {
        output::info(format!("  {}", form.usage));
        output::info(format!("      {}", form.effect));
    }
    if !entry.aliases.is_empty() {
        output::info(format!("Also: {}", entry.aliases.join(", ")));
    }
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

/// Prints `records` numbered by their position in the ledger, which `delete <n>` accepts.
fn print_records(context: &ShellContext, records: &[&Record]) {
    let all = context.store.records();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let position = all
                .iter()
                .position(|candidate| candidate.id() == record.id())
                .map(|index| (index + 1).to_string())
                .unwrap_or_default();
            vec![
                position,
                record.date_string(),
                record.description().to_string(),
                record.signed_display(),
            ]
        })
        .collect();
    println!("{}", output::render_table(&TABLE_HEADERS, &rows));
}
