mod body;
pub use body::read_body;

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::http_store::HttpTextStore;
use crate::io::store::TextStore;
use crate::logging;
use crate::model::config::Config;
use crate::model::text::{Category, EditBuffer};
use crate::ops::query::{category_counts, filter_texts};
use crate::ops::text_ops::{TextService, TextServiceError};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, json: bool, config: &Config) -> HandlerResult {
    let mut service = TextService::new(HttpTextStore::from_config(&config.api)?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_command(
        command,
        json,
        &mut service,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Run one subcommand against `service`. Output goes to `out`; `--file -`
/// bodies and the delete confirmation are read from `input`.
pub fn run_command<S: TextStore>(
    command: Commands,
    json: bool,
    service: &mut TextService<S>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> HandlerResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(args, json, service, out),
        Commands::Show(args) => cmd_show(args, json, service, out),
        Commands::Categories => cmd_categories(json, service, out),

        // Write commands
        Commands::Create(args) => cmd_create(args, json, service, input, out),
        Commands::Edit(args) => cmd_edit(args, json, service, input, out),
        Commands::Delete(args) => cmd_delete(args, json, service, input, out),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the effective config and start file logging from it.
///
/// Logging failures are reported on stderr and otherwise ignored.
pub fn load_config(config_path: Option<&str>, api_url: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path.map(Path::new), api_url)?;
    if let Err(e) = logging::init_from_config(&config.log) {
        eprintln!("warning: logging disabled: {}", e);
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> HandlerResult {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> HandlerResult {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// A write went through but the list could not be reloaded afterwards
fn warn_if_stale<S: TextStore>(service: &TextService<S>) {
    if let Some(reason) = service.stale() {
        eprintln!("warning: could not reload texts after the change: {}", reason);
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list<S: TextStore>(
    args: ListArgs,
    json: bool,
    service: &mut TextService<S>,
    out: &mut impl Write,
) -> HandlerResult {
    let texts = service.refresh()?;
    let search = args.search.unwrap_or_default();
    let matches = filter_texts(texts, &search, args.category);

    if json {
        let results: Vec<TextJson> = matches.iter().map(|t| text_to_json(t)).collect();
        return print_json(out, &results);
    }

    if matches.is_empty() {
        writeln!(out, "No texts found.")?;
        return Ok(());
    }
    for (i, record) in matches.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        print_lines(out, &format_text_card(record))?;
    }
    Ok(())
}

fn cmd_show<S: TextStore>(
    args: ShowArgs,
    json: bool,
    service: &mut TextService<S>,
    out: &mut impl Write,
) -> HandlerResult {
    let record = service.fetch_one(args.id)?;
    if json {
        return print_json(out, &text_to_detail_json(record));
    }
    print_lines(out, &format_text_detail(record, args.raw))
}

fn cmd_categories<S: TextStore>(
    json: bool,
    service: &mut TextService<S>,
    out: &mut impl Write,
) -> HandlerResult {
    let counts = category_counts(service.refresh()?);
    if json {
        let results: Vec<CategoryJson> = counts
            .iter()
            .map(|&(category, count)| category_to_json(category, count))
            .collect();
        return print_json(out, &results);
    }
    for (category, count) in counts {
        writeln!(out, "{}", format_category_line(category, count))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_create<S: TextStore>(
    args: CreateArgs,
    json: bool,
    service: &mut TextService<S>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> HandlerResult {
    let mut buffer = EditBuffer::with_category(args.category);
    buffer.body = read_body(&args.body, "", input)?;
    let created = service.create(&buffer)?;
    warn_if_stale(service);
    if json {
        return print_json(out, &text_to_json(&created));
    }
    writeln!(out, "Created #{} ({})", created.id, created.category.label())?;
    Ok(())
}

fn cmd_edit<S: TextStore>(
    args: EditArgs,
    json: bool,
    service: &mut TextService<S>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> HandlerResult {
    let mut buffer = EditBuffer::from_record(service.fetch_one(args.id)?);
    if let Some(category) = args.category {
        buffer.category = category;
    }
    buffer.body = read_body(&args.body, &buffer.body, input)?;
    let updated = service.update(args.id, &buffer)?;
    warn_if_stale(service);
    if json {
        return print_json(out, &text_to_json(&updated));
    }
    writeln!(out, "Updated #{} ({})", updated.id, updated.category.label())?;
    Ok(())
}

fn cmd_delete<S: TextStore>(
    args: DeleteArgs,
    json: bool,
    service: &mut TextService<S>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> HandlerResult {
    service.refresh()?;
    let mut targets: Vec<(i64, Category)> = Vec::new();
    for &id in &args.ids {
        if targets.iter().any(|&(seen, _)| seen == id) {
            continue;
        }
        let record = service.find(id).ok_or(TextServiceError::NotFound(id))?;
        targets.push((id, record.category));
    }

    if !args.yes && !confirm_delete(&targets, input)? {
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    delete_targets(&targets, json, service, out)
}

/// Delete already validated ids in order
fn delete_targets<S: TextStore>(
    targets: &[(i64, Category)],
    json: bool,
    service: &mut TextService<S>,
    out: &mut impl Write,
) -> HandlerResult {
    let mut deleted = Vec::new();
    for &(id, category) in targets {
        service.delete(id)?;
        deleted.push(id);
        if !json {
            writeln!(out, "Deleted #{} ({})", id, category.label())?;
        }
    }
    warn_if_stale(service);
    if json {
        return print_json(out, &DeletedJson { deleted });
    }
    Ok(())
}

/// Ask on stderr, read the answer from `input`. Only `y`/`yes` confirm.
fn confirm_delete(targets: &[(i64, Category)], input: &mut impl BufRead) -> io::Result<bool> {
    let ids: Vec<String> = targets.iter().map(|(id, _)| format!("#{}", id)).collect();
    eprint!(
        "Delete {} text{} ({})? This cannot be undone. [y/N] ",
        targets.len(),
        plural(targets.len()),
        ids.join(", ")
    );
    io::stderr().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::MemoryTextStore;
    use crate::model::text::TextRecord;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn record(id: i64, body: &str, category: Category) -> TextRecord {
        TextRecord {
            id,
            body: body.into(),
            category,
            created_at: "2024-01-02T08:00:00".into(),
            modified_at: "2024-01-03T08:00:00".into(),
        }
    }

    fn service() -> TextService<MemoryTextStore> {
        TextService::new(MemoryTextStore::with_records(vec![
            record(1, "Bienvenido|Paso uno", Category::Tutorial),
            record(2, "Acepta los terminos", Category::TermsAndConditions),
            record(3, "Somos un equipo", Category::AboutUs),
        ]))
    }

    fn run(args: &[&str], service: &mut TextService<MemoryTextStore>, stdin: &str) -> Result<String, String> {
        let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
        let mut out = Vec::new();
        let mut input = stdin.as_bytes();
        run_command(
            cli.command.expect("subcommand"),
            cli.json,
            service,
            &mut input,
            &mut out,
        )
        .map_err(|e| e.to_string())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn list_filters_by_search_and_category() {
        let mut svc = service();
        let out = run(&["td", "list", "--search", "PASO"], &mut svc, "").unwrap();
        assert!(out.contains("#1 Tutorial"));
        assert!(!out.contains("#2"));

        let out = run(&["td", "list", "-c", "about-us"], &mut svc, "").unwrap();
        assert!(out.starts_with("#3 Sobre Nosotros"));

        let out = run(&["td", "list", "-s", "nada"], &mut svc, "").unwrap();
        assert_eq!(out, "No texts found.\n");
    }

    #[test]
    fn list_json_keeps_store_order() {
        let mut svc = service();
        let out = run(&["td", "list", "--json"], &mut svc, "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let ids: Vec<i64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn show_formats_and_raw() {
        let mut svc = service();
        let out = run(&["td", "show", "1"], &mut svc, "").unwrap();
        assert!(out.ends_with("Bienvenido\n\nPaso uno\n"));

        let out = run(&["td", "show", "1", "--raw"], &mut svc, "").unwrap();
        assert!(out.ends_with("Bienvenido|Paso uno\n"));
    }

    #[test]
    fn show_unknown_id_fails() {
        let mut svc = service();
        let err = run(&["td", "show", "99"], &mut svc, "").unwrap_err();
        assert_eq!(err, "text #99 not found");
    }

    #[test]
    fn create_encodes_newlines() {
        let mut svc = service();
        let out = run(
            &["td", "create", "-c", "diary", "--text", "linea uno\nlinea dos"],
            &mut svc,
            "",
        )
        .unwrap();
        assert_eq!(out, "Created #4 (Diario)\n");
        let stored = svc.find(4).unwrap();
        assert_eq!(stored.body, "linea uno|linea dos");
        assert_eq!(stored.category, Category::Diary);
    }

    #[test]
    fn create_reads_body_from_injected_stdin() {
        let mut svc = service();
        let out = run(
            &["td", "create", "-c", "agenda", "--file", "-"],
            &mut svc,
            "Lunes\nMartes\n",
        )
        .unwrap();
        assert_eq!(out, "Created #4 (Agenda)\n");
        assert_eq!(svc.find(4).unwrap().body, "Lunes|Martes");
    }

    #[test]
    fn create_rejects_blank_body() {
        let mut svc = service();
        let err = run(&["td", "create", "-c", "diary", "--text", "  \n"], &mut svc, "").unwrap_err();
        assert_eq!(err, "text body cannot be empty");
        assert_eq!(svc.store().records().len(), 3);
    }

    #[test]
    fn edit_changes_category_and_body() {
        let mut svc = service();
        let out = run(
            &["td", "edit", "2", "-c", "settings", "--text", "Nuevo texto"],
            &mut svc,
            "",
        )
        .unwrap();
        assert_eq!(out, "Updated #2 (Configuración)\n");
        let stored = svc.find(2).unwrap();
        assert_eq!(stored.body, "Nuevo texto");
        assert_eq!(stored.category, Category::Settings);
    }

    #[test]
    fn delete_with_yes_skips_prompt() {
        let mut svc = service();
        let out = run(&["td", "delete", "1", "3", "--yes"], &mut svc, "").unwrap();
        assert_eq!(out, "Deleted #1 (Tutorial)\nDeleted #3 (Sobre Nosotros)\n");
        let ids: Vec<i64> = svc.texts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn writes_succeed_when_reload_fails() {
        let mut svc = service();
        svc.store().set_list_failure(Some(503));
        let out = run(&["td", "create", "-c", "diary", "--text", "hola"], &mut svc, "").unwrap();
        assert_eq!(out, "Created #4 (Diario)\n");
        assert_eq!(svc.store().records().len(), 4);
    }

    #[test]
    fn delete_keeps_going_when_reload_fails() {
        let mut svc = service();
        svc.store().set_list_failure(Some(503));
        let targets = [(1, Category::Tutorial), (3, Category::AboutUs)];
        let mut out = Vec::new();
        delete_targets(&targets, false, &mut svc, &mut out).unwrap();

        let ids: Vec<i64> = svc.store().records().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deleted #1 (Tutorial)\nDeleted #3 (Sobre Nosotros)\n"
        );
    }

    #[test]
    fn delete_prompt_declined_keeps_texts() {
        let mut svc = service();
        let out = run(&["td", "delete", "1"], &mut svc, "n\n").unwrap();
        assert_eq!(out, "Aborted.\n");
        assert_eq!(svc.texts().len(), 3);

        let out = run(&["td", "delete", "1"], &mut svc, "yes\n").unwrap();
        assert_eq!(out, "Deleted #1 (Tutorial)\n");
        assert_eq!(svc.texts().len(), 2);
    }

    #[test]
    fn delete_checks_every_id_before_deleting() {
        let mut svc = service();
        let err = run(&["td", "delete", "1", "42", "--yes"], &mut svc, "").unwrap_err();
        assert_eq!(err, "text #42 not found");
        assert_eq!(svc.texts().len(), 3);
    }

    #[test]
    fn categories_lists_every_category_with_counts() {
        let mut svc = service();
        let out = run(&["td", "categories", "--json"], &mut svc, "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), Category::ALL.len());
        assert_eq!(rows[0]["slug"], "tutorial");
        assert_eq!(rows[0]["count"], 1);
        assert_eq!(rows[4]["count"], 0);
    }

    #[test]
    fn store_failure_surfaces_as_error() {
        let mut svc = service();
        svc.store().set_failure(Some(500));
        let err = run(&["td", "list"], &mut svc, "").unwrap_err();
        assert!(err.contains("500"), "{err}");
    }
}
