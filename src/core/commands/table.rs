//! Command table: distro commands merged over the core built-ins.

use indexmap::IndexMap;

use crate::models::{ActionTag, CommandSpec, DistroConfig};

/// What a command name resolves to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub description: String,
    /// Static output lines, printed when neither an action nor an
    /// interpreter built-in claims the command.
    pub outputs: Vec<String>,
    pub action: Option<ActionTag>,
}

impl CommandDescriptor {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: ActionTag) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = outputs;
        self
    }
}

impl From<CommandSpec> for CommandDescriptor {
    fn from(spec: CommandSpec) -> Self {
        Self {
            description: spec.description,
            outputs: spec.output.map(|o| o.into_lines()).unwrap_or_default(),
            action: spec.action,
        }
    }
}

/// Name of the meta-command switching distros.
pub const SWITCH_DISTRO_COMMAND: &str = "distro";

/// Name of the meta-command listing distros.
pub const LIST_DISTROS_COMMAND: &str = "distros";

/// Commands whose static output is stamped with live session values.
const DYNAMIC_COMMANDS: &[&str] = &["whoami", "pwd"];

/// Built-in commands every distro gets unless it defines its own, in order.
pub fn core_defaults() -> IndexMap<String, CommandDescriptor> {
    use ActionTag::*;

    let entries = [
        ("help", CommandDescriptor::new("Show this list of commands")),
        ("clear", CommandDescriptor::new("Clear the screen").with_action(Clear)),
        ("echo", CommandDescriptor::new("Print its arguments")),
        ("cat", CommandDescriptor::new("Print a file")),
        ("ls", CommandDescriptor::new("List directory contents")),
        ("cd", CommandDescriptor::new("Change the working directory").with_action(Cd)),
        ("pwd", CommandDescriptor::new("Print the working directory")),
        ("whoami", CommandDescriptor::new("Print the current user")),
        ("date", CommandDescriptor::new("Print the current date and time").with_action(Date)),
        ("history", CommandDescriptor::new("Show command history").with_action(History)),
        ("theme", CommandDescriptor::new("Toggle light/dark theme").with_action(Theme)),
        ("mkdir", CommandDescriptor::new("Create a directory").with_action(Mkdir)),
        ("touch", CommandDescriptor::new("Create an empty file").with_action(Touch)),
        ("rm", CommandDescriptor::new("Remove a file").with_action(Rm)),
    ];

    entries
        .into_iter()
        .map(|(name, descriptor)| (name.to_string(), descriptor))
        .collect()
}

fn meta_commands() -> [(&'static str, CommandDescriptor); 2] {
    [
        (
            SWITCH_DISTRO_COMMAND,
            CommandDescriptor::new("Switch to another distribution")
                .with_action(ActionTag::SwitchDistro),
        ),
        (
            LIST_DISTROS_COMMAND,
            CommandDescriptor::new("List available distributions")
                .with_action(ActionTag::ListDistros),
        ),
    ]
}

/// Insertion-ordered mapping from command name (or full phrase) to descriptor.
///
/// Built once per distro and replaced wholesale on a switch; only the
/// dynamic `whoami`/`pwd` outputs are refreshed in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandTable {
    entries: IndexMap<String, CommandDescriptor>,
    /// Dynamic commands that came from the core defaults and may be re-stamped.
    stamped: Vec<String>,
}

impl CommandTable {
    /// Merge `defaults` under `distro`: distro entries always win.
    ///
    /// Distro entries keep their order, missing defaults follow in theirs,
    /// and the distro meta-commands are appended unless already defined.
    pub fn build(
        distro: IndexMap<String, CommandDescriptor>,
        defaults: IndexMap<String, CommandDescriptor>,
    ) -> Self {
        let mut entries = distro;
        let mut stamped = Vec::new();

        for (name, descriptor) in defaults {
            if entries.contains_key(&name) {
                continue;
            }
            if DYNAMIC_COMMANDS.contains(&name.as_str()) {
                stamped.push(name.clone());
            }
            entries.insert(name, descriptor);
        }

        for (name, descriptor) in meta_commands() {
            entries.entry(name.to_string()).or_insert(descriptor);
        }

        Self { entries, stamped }
    }

    /// Build the table for a distro and stamp the dynamic entries.
    pub fn from_config(config: &DistroConfig, cwd: &str) -> Self {
        let distro = config
            .commands
            .iter()
            .map(|(name, spec)| (name.clone(), CommandDescriptor::from(spec.clone())))
            .collect();
        let mut table = Self::build(distro, core_defaults());
        table.refresh_dynamic(&config.system.user, cwd);
        table
    }

    /// Re-stamp `whoami` and `pwd` with the live user and working directory.
    pub fn refresh_dynamic(&mut self, user: &str, cwd: &str) {
        for name in &self.stamped {
            let value = match name.as_str() {
                "whoami" => user,
                "pwd" => cwd,
                _ => continue,
            };
            if let Some(descriptor) = self.entries.get_mut(name) {
                descriptor.outputs = vec![value.to_string()];
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
