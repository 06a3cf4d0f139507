//! Headless smoke CLI for the GraphBar core.
//!
//! # Responsibility
//! - Drive the widget model against a SQLite key-value store without a browser.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Environment:
//! - `GRAPHBAR_DB_PATH`: store file, same as `--db` (default: `<tmp>/graphbar.sqlite3`).
//! - `GRAPHBAR_ORIGIN`: storage origin, same as `--origin` (default: `local`).
//! - `GRAPHBAR_LOG_DIR`: absolute directory for rolling logs (off when unset).

use clap::{Parser, Subcommand};
use graphbar_core::{
    core_version, default_log_level, init_logging, AddOutcome, GraphController, GraphService,
    InputField, ListClickTarget, MemorySurface, RepoResult, SqliteKeyValueStore,
    StoredGraphListRepository, SystemClock, WidgetConfig,
};
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "graphbar.sqlite3";
const DEFAULT_ORIGIN: &str = "local";

type CliController =
    GraphController<StoredGraphListRepository<SqliteKeyValueStore>, MemorySurface, SystemClock>;

#[derive(Debug, Parser)]
#[command(name = "graphbar", version)]
#[command(about = "Drive the GraphBar widget model against a local SQLite store")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// SQLite store file.
    #[arg(long, global = true, env = "GRAPHBAR_DB_PATH")]
    db: Option<PathBuf>,
    /// Storage origin the list is scoped to.
    #[arg(long, global = true, env = "GRAPHBAR_ORIGIN", default_value = DEFAULT_ORIGIN)]
    origin: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print name, label and bar fill per entry
    List,
    /// Validate and append an entry
    Add { name: String, value: String },
    /// Remove every entry named NAME
    Delete { name: String },
    /// Print the list markup
    Render,
    /// Print the core version
    Version,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::Render => "render",
            Self::Version => "version",
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CommandOutput {
    stdout: String,
    stderr: String,
    exit_code: u8,
}

impl CommandOutput {
    fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    fn fail(stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code: 1,
            ..Self::default()
        }
    }
}

fn main() -> ExitCode {
    if let Some(log_dir) = env_value("GRAPHBAR_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let output = run_cli(std::env::args_os());
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    ExitCode::from(output.exit_code)
}

/// Parses `args` (including the binary name) and runs the command.
fn run_cli<I, T>(args: I) -> CommandOutput
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => execute(cli),
        Err(err) => {
            let rendered = err.render().to_string();
            let exit_code = u8::try_from(err.exit_code()).unwrap_or(2);
            if err.use_stderr() {
                CommandOutput {
                    stderr: rendered,
                    exit_code,
                    ..CommandOutput::default()
                }
            } else {
                CommandOutput {
                    stdout: rendered,
                    exit_code,
                    ..CommandOutput::default()
                }
            }
        }
    }
}

fn execute(cli: Cli) -> CommandOutput {
    if cli.command == Command::Version {
        return CommandOutput::ok(format!("graphbar version {}\n", core_version()));
    }

    let db_path = cli
        .db
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let store = match SqliteKeyValueStore::open(&db_path, cli.origin.as_str()) {
        Ok(store) => store,
        Err(err) => {
            return CommandOutput::fail(format!(
                "Error: failed to open store `{}`: {err}\n",
                db_path.display()
            ))
        }
    };
    run_command(store, &cli.command)
}

fn run_command(store: SqliteKeyValueStore, command: &Command) -> CommandOutput {
    let mut controller = match start_controller(store) {
        Ok(controller) => controller,
        Err(err) => return CommandOutput::fail(format!("Error: {err}\n")),
    };

    let result = match command {
        Command::List => Ok(list_output(&controller)),
        Command::Render => Ok(CommandOutput::ok(format!(
            "{}\n",
            controller.service().surface().markup()
        ))),
        Command::Add { name, value } => add_graph(&mut controller, name, value),
        Command::Delete { name } => controller
            .on_list_clicked(&ListClickTarget::DeleteButton {
                row_name: name.clone(),
            })
            .map(|removed| CommandOutput::ok(format!("removed {removed}\n"))),
        Command::Version => Ok(CommandOutput::ok(format!(
            "graphbar version {}\n",
            core_version()
        ))),
    };

    let output = result.unwrap_or_else(|err| CommandOutput::fail(format!("Error: {err}\n")));
    info!(
        "event=cli_command module=cli status={} command={}",
        if output.exit_code == 0 { "ok" } else { "error" },
        command.name()
    );
    output
}

fn start_controller(store: SqliteKeyValueStore) -> RepoResult<CliController> {
    let config = WidgetConfig::default();
    let service = GraphService::new(
        StoredGraphListRepository::from_config(store, &config),
        MemorySurface::new(),
        SystemClock,
        &config,
    );
    GraphController::start(service)
}

fn add_graph(
    controller: &mut CliController,
    name: &str,
    value: &str,
) -> RepoResult<CommandOutput> {
    let surface = controller.service_mut().surface_mut();
    surface.type_input(InputField::Name, name);
    surface.type_input(InputField::Value, value);

    match controller.on_add_clicked()? {
        Some(AddOutcome::Added) => Ok(CommandOutput::ok(format!("added {name}\n"))),
        Some(AddOutcome::Rejected(_)) => {
            let mut stderr = String::new();
            // Oldest first reads naturally in a terminal.
            for shown in controller.service().surface().notifications().iter().rev() {
                stderr.push_str(&shown.text);
                stderr.push('\n');
            }
            Ok(CommandOutput::fail(stderr))
        }
        None => Ok(CommandOutput::fail("Error: widget is read-only\n")),
    }
}

fn list_output(controller: &CliController) -> CommandOutput {
    let mut stdout = String::new();
    for row in controller.service().surface().rows() {
        stdout.push_str(&format!("{}\t{}\t{}%\n", row.name, row.label, row.fill_percent));
    }
    CommandOutput::ok(stdout)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{run_cli, run_command, Cli, Command, CommandOutput};
    use clap::{CommandFactory, Parser};
    use graphbar_core::{KeyValueStore, SqliteKeyValueStore};
    use std::path::{Path, PathBuf};

    struct Workspace {
        _dir: tempfile::TempDir,
        db: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let db = dir.path().join("cli.sqlite3");
            Self { _dir: dir, db }
        }

        fn run(&self, args: &[&str]) -> CommandOutput {
            self.run_in("test", args)
        }

        fn run_in(&self, origin: &str, args: &[&str]) -> CommandOutput {
            let db = path_arg(&self.db);
            let mut argv = vec!["graphbar", "--db", db.as_str(), "--origin", origin];
            argv.extend_from_slice(args);
            run_cli(argv)
        }
    }

    fn path_arg(path: &Path) -> String {
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_or_after_subcommand() {
        let cli = Cli::try_parse_from(["graphbar", "add", "cpu", "50", "--origin", "x"]).unwrap();
        assert_eq!(cli.origin, "x");
        assert_eq!(
            cli.command,
            Command::Add {
                name: "cpu".to_string(),
                value: "50".to_string()
            }
        );

        let cli = Cli::try_parse_from(["graphbar", "--db", "/tmp/a.sqlite3", "list"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/a.sqlite3")));
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn help_and_version_do_not_touch_store() {
        let ws = Workspace::new();

        let help = ws.run(&["--help"]);
        assert_eq!(help.exit_code, 0);
        assert!(help.stdout.contains("Usage: graphbar"));

        let version = ws.run(&["version"]);
        assert!(version.stdout.starts_with("graphbar version "));
        assert!(!ws.db.exists());
    }

    #[test]
    fn usage_errors_exit_with_clap_code() {
        let missing = run_cli(["graphbar", "--db"]);
        assert_eq!(missing.exit_code, 2);
        assert!(missing.stderr.contains("--db"));

        let unknown = run_cli(["graphbar", "frobnicate"]);
        assert_eq!(unknown.exit_code, 2);
        assert!(unknown.stdout.is_empty());

        let incomplete = run_cli(["graphbar", "add", "cpu"]);
        assert_eq!(incomplete.exit_code, 2);
    }

    #[test]
    fn add_list_delete_round_trip() {
        let ws = Workspace::new();

        let added = ws.run(&["add", "cpu", "50"]);
        assert_eq!(added.exit_code, 0, "{}", added.stderr);
        ws.run(&["add", "disk", "100"]);

        let listed = ws.run(&["list"]);
        assert_eq!(listed.stdout, "cpu\t50%\t50%\ndisk\t100%\t100%\n");

        let deleted = ws.run(&["delete", "cpu"]);
        assert_eq!(deleted.stdout, "removed 1\n");
        assert_eq!(ws.run(&["list"]).stdout, "disk\t100%\t100%\n");
    }

    #[test]
    fn rejected_add_prints_notifications_and_fails() {
        let ws = Workspace::new();
        ws.run(&["add", "cpu", "50"]);

        let duplicate = ws.run(&["add", "cpu", "10"]);
        assert_eq!(duplicate.exit_code, 1);
        assert!(duplicate.stderr.contains("[DuplicateException]"));

        let both = ws.run(&["add", "a!", "x"]);
        assert_eq!(
            both.stderr.lines().collect::<Vec<_>>(),
            vec![
                "column >> [SpecialCharactersException] Special characters are not allowed.",
                "value >> [NumericException] Only numbers can be entered.",
            ]
        );
    }

    #[test]
    fn origins_do_not_share_lists() {
        let ws = Workspace::new();
        ws.run_in("a", &["add", "cpu", "50"]);
        assert_eq!(ws.run_in("b", &["list"]).stdout, "");
        assert_eq!(ws.run_in("a", &["list"]).stdout, "cpu\t50%\t50%\n");
    }

    #[test]
    fn render_prints_clamped_markup() {
        let mut store = SqliteKeyValueStore::open_in_memory("test").unwrap();
        store
            .set_item("graphList", r#"[{"column":"cpu","value":"150"}]"#)
            .unwrap();

        let rendered = run_command(store, &Command::Render).stdout;
        assert!(rendered.contains(r#"style="width: 100%;">150%</div>"#));
        assert!(rendered.contains(r#"data-name="cpu""#));
    }

    #[test]
    fn unopenable_store_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let db = path_arg(dir.path());
        let output = run_cli(["graphbar", "--db", db.as_str(), "list"]);
        assert_eq!(output.exit_code, 1);
        assert!(output.stderr.contains("failed to open store"));
    }
}
