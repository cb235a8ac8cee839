//! Command execution logic.
//!
//! Contains the `execute` function that resolves a submitted line against
//! the command table and runs it against the session and virtual filesystem.

use log::debug;

use crate::config::{HISTORY_INDEX_WIDTH, LS_SEPARATOR, MS_PER_SECOND};
use crate::core::error::{FsError, ShellError};
use crate::core::path::{normalize, resolve};
use crate::core::{Session, VirtualFs};
use crate::models::{ActionTag, DirEntry, DistroRegistry, OutputLine, SystemInfo};
use crate::utils::{format_datetime, render_template};

use super::{Builtin, CommandResult, CommandTable, Effect};

/// Everything a command may read or change.
pub struct ExecContext<'a> {
    pub session: &'a mut Session,
    pub table: &'a CommandTable,
    pub fs: &'a VirtualFs,
    pub system: &'a SystemInfo,
    /// Registry of switchable distros; `None` in single-distro deployments.
    pub registry: Option<&'a DistroRegistry>,
    pub active_distro: Option<&'a str>,
    /// Wall-clock time of the submission, for `date`.
    pub now_ms: u64,
}

/// Execute one submitted line.
///
/// Failures are rendered as a single error line; nothing is returned as an
/// error. Every non-blank line is recorded in the session afterwards,
/// whether it succeeded or not.
pub fn execute(line: &str, ctx: &mut ExecContext<'_>) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::empty();
    }

    debug!("Executing '{}' in {}", line, ctx.session.cwd());
    let result = dispatch(line, ctx)
        .unwrap_or_else(|e| CommandResult::output(vec![OutputLine::error(e.to_string())]));
    ctx.session.record(line);
    result
}

/// Resolve a line against the table: full line first, then the first word.
fn dispatch(line: &str, ctx: &mut ExecContext<'_>) -> Result<CommandResult, ShellError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Ok(CommandResult::empty());
    };

    let table = ctx.table;
    let (key, descriptor) = match table.get(line) {
        Some(descriptor) => (line, descriptor),
        None => match table.get(command) {
            Some(descriptor) => (command, descriptor),
            None => return Err(not_found(command, ctx.system)),
        },
    };

    if let Some(action) = descriptor.action {
        return run_action(action, command, args, ctx);
    }
    if let Some(builtin) = Builtin::from_name(key) {
        return run_builtin(builtin, command, args, ctx);
    }
    Ok(CommandResult::output(
        descriptor.outputs.iter().map(OutputLine::text).collect(),
    ))
}

fn not_found(command: &str, system: &SystemInfo) -> ShellError {
    let package_manager = system.package_manager.as_deref().unwrap_or_default();
    ShellError::UnknownCommand(render_template(
        system.not_found_template(),
        &[
            ("cmd", command),
            ("user", &system.user),
            ("host", &system.host),
            ("name", &system.name),
            ("pm", package_manager),
        ],
    ))
}

// =============================================================================
// Interpreter Built-ins
// =============================================================================

fn run_builtin(
    builtin: Builtin,
    command: &str,
    args: &[&str],
    ctx: &mut ExecContext<'_>,
) -> Result<CommandResult, ShellError> {
    match builtin {
        Builtin::Help => Ok(help(ctx.table)),
        Builtin::Echo => Ok(CommandResult::output(vec![OutputLine::text(args.join(" "))])),
        Builtin::Cat => cat(command, args, ctx),
        Builtin::Ls => ls(command, args, ctx),
        Builtin::Pwd => Ok(CommandResult::output(vec![OutputLine::text(
            ctx.session.cwd(),
        )])),
    }
}

/// Every table entry in table order, descriptions aligned.
fn help(table: &CommandTable) -> CommandResult {
    let width = table.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    CommandResult::output(
        table
            .iter()
            .map(|(name, d)| OutputLine::text(format!("{:<width$}  {}", name, d.description)))
            .collect(),
    )
}

fn cat(command: &str, args: &[&str], ctx: &ExecContext<'_>) -> Result<CommandResult, ShellError> {
    let arg = args
        .first()
        .ok_or_else(|| ShellError::missing_operand(command))?;
    let path = resolve(arg, ctx.session.cwd(), ctx.fs);
    let content = ctx
        .fs
        .read(&path)
        .map_err(|e| ShellError::fs(command, e.with_path(arg)))?;
    Ok(CommandResult::output(vec![OutputLine::block(content)]))
}

/// Entries on one line, directories marked with a trailing `/`.
fn ls(command: &str, args: &[&str], ctx: &ExecContext<'_>) -> Result<CommandResult, ShellError> {
    let arg = args
        .iter()
        .copied()
        .find(|a| !a.starts_with('-'))
        .unwrap_or(".");
    let path = resolve(arg, ctx.session.cwd(), ctx.fs);
    let entries = ctx
        .fs
        .list(&path)
        .map_err(|e| ShellError::fs(command, e.with_path(arg)))?;

    if entries.is_empty() {
        return Ok(CommandResult::empty());
    }
    let line = entries
        .iter()
        .map(DirEntry::display_name)
        .collect::<Vec<_>>()
        .join(LS_SEPARATOR);
    Ok(CommandResult::output(vec![OutputLine::listing(line)]))
}

// =============================================================================
// Action Handlers
// =============================================================================

fn run_action(
    action: ActionTag,
    command: &str,
    args: &[&str],
    ctx: &mut ExecContext<'_>,
) -> Result<CommandResult, ShellError> {
    match action {
        ActionTag::Clear => Ok(CommandResult::with_effect(vec![], Effect::ClearScreen)),
        ActionTag::Date => Ok(CommandResult::output(vec![OutputLine::text(
            format_datetime(ctx.now_ms / MS_PER_SECOND),
        )])),
        ActionTag::History => Ok(history(ctx.session)),
        ActionTag::Theme => {
            let theme = ctx.session.toggle_theme();
            Ok(CommandResult::with_effect(
                vec![OutputLine::success(format!("Theme switched to {}", theme))],
                Effect::ThemeChanged(theme),
            ))
        }
        ActionTag::Cd => change_directory(command, args, ctx),
        ActionTag::Mkdir => simulated(command, args, "created directory"),
        ActionTag::Touch => simulated(command, args, "created file"),
        ActionTag::Rm => simulated(command, args, "removed"),
        ActionTag::SwitchDistro => switch_distro(command, args, ctx),
        ActionTag::ListDistros => Ok(list_distros(ctx)),
    }
}

fn history(session: &Session) -> CommandResult {
    if session.history().is_empty() {
        return CommandResult::output(vec![OutputLine::info("No commands in history")]);
    }
    CommandResult::output(
        session
            .history()
            .iter()
            .enumerate()
            .map(|(i, cmd)| {
                OutputLine::text(format!("{:>width$}  {}", i + 1, cmd, width = HISTORY_INDEX_WIDTH))
            })
            .collect(),
    )
}

/// `cd` with no operand or `~` goes home; the working directory only
/// changes when the target is an existing directory.
fn change_directory(
    command: &str,
    args: &[&str],
    ctx: &mut ExecContext<'_>,
) -> Result<CommandResult, ShellError> {
    let target = match args.first() {
        None => ctx.fs.home().to_string(),
        Some(arg) => {
            let resolved = resolve(arg, ctx.session.cwd(), ctx.fs);
            match ctx.fs.lookup(&resolved) {
                None => return Err(ShellError::fs(command, FsError::NoSuchPath(arg.to_string()))),
                Some(node) if !node.is_directory() => {
                    return Err(ShellError::fs(
                        command,
                        FsError::NotADirectory(arg.to_string()),
                    ));
                }
                Some(_) => normalize(&resolved),
            }
        }
    };

    ctx.session.set_cwd(target);
    Ok(CommandResult::empty())
}

/// `mkdir`, `touch` and `rm` report success without touching the tree.
fn simulated(command: &str, args: &[&str], verb: &str) -> Result<CommandResult, ShellError> {
    if args.is_empty() {
        return Err(ShellError::missing_operand(command));
    }
    Ok(CommandResult::output(
        args.iter()
            .map(|arg| OutputLine::success(format!("{}: {} '{}'", command, verb, arg)))
            .collect(),
    ))
}

fn switch_distro(
    command: &str,
    args: &[&str],
    ctx: &ExecContext<'_>,
) -> Result<CommandResult, ShellError> {
    let Some(registry) = ctx.registry else {
        return Ok(CommandResult::output(vec![OutputLine::info(format!(
            "{}: only {} is installed here",
            command, ctx.system.name
        ))]));
    };

    let key = *args
        .first()
        .ok_or_else(|| ShellError::missing_operand(command))?;
    let entry = registry
        .get(key)
        .ok_or_else(|| ShellError::UnknownDistro(key.to_string()))?;

    if ctx.active_distro == Some(key) {
        return Ok(CommandResult::output(vec![OutputLine::info(format!(
            "{} is already running",
            entry.display_name
        ))]));
    }

    Ok(CommandResult::with_effect(
        vec![OutputLine::info(format!("Switching to {}...", entry.display_name))],
        Effect::SwitchDistro(key.to_string()),
    ))
}

/// Registry entries with the active one starred.
fn list_distros(ctx: &ExecContext<'_>) -> CommandResult {
    let Some(registry) = ctx.registry else {
        return CommandResult::output(vec![OutputLine::text(format!("* {}", ctx.system.name))]);
    };

    let width = registry.entries.keys().map(String::len).max().unwrap_or(0);
    CommandResult::output(
        registry
            .entries
            .iter()
            .map(|(key, entry)| {
                let marker = if ctx.active_distro == Some(key.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let mut line = format!("{} {:<width$}  {}", marker, key, entry.display_name);
                if !entry.description.is_empty() {
                    line.push_str(" - ");
                    line.push_str(&entry.description);
                }
                OutputLine::text(line)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistroConfig, LineStyle, Theme};

    const NOW_MS: u64 = 1_000_000_000_000;

    const CONFIG: &str = r#"{
        "system": {
            "name": "Testix",
            "user": "ada",
            "host": "lab",
            "commandNotFoundTemplate": "bash: {cmd}: command not found",
            "packageManager": "apt"
        },
        "filesystem": {"~": ["a.txt", "sub/"]},
        "files": {"a.txt": "hello"},
        "commands": {
            "neofetch": {"description": "System information", "output": ["Testix", "kernel 6.1"]},
            "sudo": {"description": "Run as root", "output": "ada is not in the sudoers file."},
            "sudo rm -rf /": {"description": "Do not", "output": "nice try"},
            "wipe": {"description": "Clear", "output": "never shown", "action": "clear"},
            "cat": {"description": "Concatenate files", "output": "static cat"}
        }
    }"#;

    const REGISTRY: &str = r#"{
        "defaultKey": "testix",
        "entries": {
            "testix": {"displayName": "Testix 1.0", "configLocation": "t.json", "description": "the test distro"},
            "other": {"displayName": "Other OS", "configLocation": "o.json"}
        }
    }"#;

    struct Harness {
        config: DistroConfig,
        fs: VirtualFs,
        table: CommandTable,
        session: Session,
        registry: Option<DistroRegistry>,
        active: Option<String>,
    }

    impl Harness {
        fn new() -> Self {
            let config: DistroConfig = serde_json::from_str(CONFIG).unwrap();
            let home = config.system.home_path();
            let fs = VirtualFs::build(&home, &config.filesystem, &config.files).unwrap();
            let table = CommandTable::from_config(&config, &home);
            Self {
                session: Session::new(home, 0),
                config,
                fs,
                table,
                registry: None,
                active: None,
            }
        }

        fn with_registry() -> Self {
            let mut harness = Self::new();
            harness.registry = Some(serde_json::from_str(REGISTRY).unwrap());
            harness.active = Some("testix".to_string());
            harness
        }

        fn run(&mut self, line: &str) -> CommandResult {
            let mut ctx = ExecContext {
                session: &mut self.session,
                table: &self.table,
                fs: &self.fs,
                system: &self.config.system,
                registry: self.registry.as_ref(),
                active_distro: self.active.as_deref(),
                now_ms: NOW_MS,
            };
            execute(line, &mut ctx)
        }
    }

    fn single_error(result: &CommandResult) -> &str {
        assert_eq!(result.output.len(), 1, "expected one line: {:?}", result.output);
        assert_eq!(result.output[0].style, LineStyle::Error);
        &result.output[0].text
    }

    #[test]
    fn test_scenario_ls_cat_cd() {
        let mut h = Harness::new();

        let ls = h.run("ls");
        assert_eq!(ls.texts(), ["a.txt  sub/"]);
        assert_eq!(ls.output[0].style, LineStyle::Listing);

        let cat = h.run("cat a.txt");
        assert_eq!(cat.texts(), ["hello"]);
        assert_eq!(cat.output[0].style, LineStyle::Block);

        h.run("cd sub");
        assert_eq!(h.session.cwd(), "/home/ada/sub");
        h.run("cd ..");
        assert_eq!(h.session.cwd(), "/home/ada");

        let missing = h.run("cat missing.txt");
        let msg = single_error(&missing);
        assert!(msg.contains("missing.txt"));
        assert_eq!(msg, "cat: missing.txt: No such file or directory");
    }

    #[test]
    fn test_unknown_command_template() {
        let mut h = Harness::new();
        let result = h.run("foo");
        assert_eq!(single_error(&result), "bash: foo: command not found");
    }

    #[test]
    fn test_unknown_command_default_template() {
        let mut h = Harness::new();
        h.config.system.command_not_found_template = None;
        let result = h.run("foo --bar");
        assert_eq!(single_error(&result), "foo: command not found");
    }

    #[test]
    fn test_full_line_match_wins() {
        let mut h = Harness::new();
        assert_eq!(h.run("sudo rm -rf /").texts(), ["nice try"]);
        assert_eq!(h.run("  sudo rm -rf /  ").texts(), ["nice try"]);
        assert_eq!(
            h.run("sudo ls").texts(),
            ["ada is not in the sudoers file."]
        );
    }

    #[test]
    fn test_static_output_lines() {
        let mut h = Harness::new();
        let result = h.run("neofetch");
        assert_eq!(result.texts(), ["Testix", "kernel 6.1"]);
        assert!(result.output.iter().all(|l| l.style == LineStyle::Text));
    }

    #[test]
    fn test_action_beats_outputs() {
        let mut h = Harness::new();
        let result = h.run("wipe");
        assert!(result.output.is_empty());
        assert_eq!(result.effect, Some(Effect::ClearScreen));
    }

    #[test]
    fn test_builtin_beats_outputs() {
        // The distro redefines `cat` with static output; the built-in still runs.
        let mut h = Harness::new();
        assert_eq!(h.run("cat a.txt").texts(), ["hello"]);
    }

    #[test]
    fn test_cat_errors() {
        let mut h = Harness::new();
        assert_eq!(single_error(&h.run("cat")), "cat: missing operand");
        assert_eq!(single_error(&h.run("cat sub")), "cat: sub: Is a directory");
        assert_eq!(h.run("cat /home/ada/a.txt").texts(), ["hello"]);
    }

    #[test]
    fn test_ls_variants() {
        let mut h = Harness::new();
        assert_eq!(h.run("ls /home").texts(), ["ada/"]);
        assert_eq!(h.run("ls -la").texts(), ["a.txt  sub/"]);
        assert!(h.run("ls sub").output.is_empty());
        assert_eq!(single_error(&h.run("ls a.txt")), "ls: a.txt: Not a directory");
        assert_eq!(
            single_error(&h.run("ls nope")),
            "ls: nope: No such file or directory"
        );
    }

    #[test]
    fn test_cd_failures_keep_cwd() {
        let mut h = Harness::new();
        assert_eq!(single_error(&h.run("cd a.txt")), "cd: a.txt: Not a directory");
        assert_eq!(
            single_error(&h.run("cd nowhere")),
            "cd: nowhere: No such file or directory"
        );
        assert_eq!(h.session.cwd(), "/home/ada");
    }

    #[test]
    fn test_cd_home_and_absolute() {
        let mut h = Harness::new();
        h.run("cd /");
        assert_eq!(h.session.cwd(), "/");
        h.run("cd");
        assert_eq!(h.session.cwd(), "/home/ada");
        h.run("cd /home/");
        assert_eq!(h.session.cwd(), "/home");
        h.run("cd ~");
        assert_eq!(h.session.cwd(), "/home/ada");
        h.run("cd ~/sub");
        assert_eq!(h.session.cwd(), "/home/ada/sub");
    }

    #[test]
    fn test_pwd_reads_live_cwd() {
        let mut h = Harness::new();
        h.run("cd sub");
        // The table's stamped output is stale here; the built-in is not.
        assert_eq!(h.table.get("pwd").unwrap().outputs, ["/home/ada"]);
        assert_eq!(h.run("pwd").texts(), ["/home/ada/sub"]);
    }

    #[test]
    fn test_whoami_static() {
        let mut h = Harness::new();
        assert_eq!(h.run("whoami").texts(), ["ada"]);
    }

    #[test]
    fn test_echo() {
        let mut h = Harness::new();
        assert_eq!(h.run("echo hello   world").texts(), ["hello world"]);
        assert_eq!(h.run("echo").texts(), [""]);
    }

    #[test]
    fn test_help_table_order_and_alignment() {
        let mut h = Harness::new();
        let result = h.run("help");
        assert_eq!(result.output.len(), h.table.len());

        let names: Vec<_> = h.table.iter().map(|(n, _)| n).collect();
        for (line, name) in result.texts().iter().zip(&names) {
            assert!(line.starts_with(name), "{line} should start with {name}");
        }

        // "sudo rm -rf /" is the longest key; descriptions start after it.
        let column = "sudo rm -rf /".len() + 2;
        let first = result.texts()[0];
        assert_eq!(&first[column..], "System information");
    }

    #[test]
    fn test_history_output() {
        let mut h = Harness::new();
        let empty = h.run("history");
        assert_eq!(empty.texts(), ["No commands in history"]);
        assert_eq!(empty.output[0].style, LineStyle::Info);

        h.run("ls");
        let result = h.run("history");
        assert_eq!(result.texts(), ["    1  history", "    2  ls"]);
    }

    #[test]
    fn test_every_line_recorded() {
        let mut h = Harness::new();
        h.run("ls");
        h.run("ls");
        h.run("foo");
        h.run("cat");
        h.run("   ");
        assert_eq!(h.session.history(), ["ls", "foo", "cat"]);
        assert_eq!(h.session.command_count(), 4);
        assert_eq!(h.session.history_cursor(), 3);
    }

    #[test]
    fn test_blank_line() {
        let mut h = Harness::new();
        assert_eq!(h.run("  "), CommandResult::empty());
        assert_eq!(h.session.command_count(), 0);
    }

    #[test]
    fn test_date() {
        let mut h = Harness::new();
        assert_eq!(h.run("date").texts(), ["2001-09-09 01:46:40 UTC"]);
    }

    #[test]
    fn test_theme_toggle() {
        let mut h = Harness::new();
        let result = h.run("theme");
        assert_eq!(result.effect, Some(Effect::ThemeChanged(Theme::Light)));
        assert_eq!(h.session.theme(), Theme::Light);
        assert_eq!(h.run("theme").effect, Some(Effect::ThemeChanged(Theme::Dark)));
    }

    #[test]
    fn test_simulated_mutations() {
        let mut h = Harness::new();
        let paths_before = h.fs.len();

        assert_eq!(
            h.run("mkdir projects").texts(),
            ["mkdir: created directory 'projects'"]
        );
        assert_eq!(
            h.run("touch x y").texts(),
            ["touch: created file 'x'", "touch: created file 'y'"]
        );
        assert_eq!(h.run("rm a.txt").texts(), ["rm: removed 'a.txt'"]);

        assert_eq!(h.fs.len(), paths_before);
        assert_eq!(h.run("cat a.txt").texts(), ["hello"]);
        assert_eq!(single_error(&h.run("ls projects")), "ls: projects: No such file or directory");
        assert_eq!(single_error(&h.run("rm")), "rm: missing operand");
    }

    #[test]
    fn test_distro_without_registry() {
        let mut h = Harness::new();
        let result = h.run("distro other");
        assert_eq!(result.effect, None);
        assert_eq!(result.texts(), ["distro: only Testix is installed here"]);
        assert_eq!(h.run("distros").texts(), ["* Testix"]);
    }

    #[test]
    fn test_distro_switch_requests() {
        let mut h = Harness::with_registry();

        assert_eq!(single_error(&h.run("distro")), "distro: missing operand");
        assert_eq!(
            single_error(&h.run("distro gentoo")),
            "distro: unknown distribution 'gentoo' (try 'distros')"
        );

        let same = h.run("distro testix");
        assert_eq!(same.effect, None);
        assert_eq!(same.texts(), ["Testix 1.0 is already running"]);

        let switch = h.run("distro other");
        assert_eq!(switch.effect, Some(Effect::SwitchDistro("other".to_string())));
        assert_eq!(switch.texts(), ["Switching to Other OS..."]);
    }

    #[test]
    fn test_list_distros() {
        let mut h = Harness::with_registry();
        assert_eq!(
            h.run("distros").texts(),
            [
                "* testix  Testix 1.0 - the test distro",
                "  other   Other OS"
            ]
        );
    }

    #[test]
    fn test_not_found_placeholders() {
        let mut h = Harness::new();
        h.config.system.command_not_found_template =
            Some("{cmd}: not found on {name}, try '{pm} install {cmd}'".to_string());
        assert_eq!(
            single_error(&h.run("htop")),
            "htop: not found on Testix, try 'apt install htop'"
        );
    }
}
