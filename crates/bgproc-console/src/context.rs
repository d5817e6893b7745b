//! Console context: arguments, application root and command registry.

use crate::command::{Command, CommandFactory};
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub struct ConsoleContext {
    root_directory: PathBuf,
    arguments: Vec<String>,
    commands: BTreeMap<String, CommandFactory>,
    default_command: Option<String>,
}

impl ConsoleContext {
    /// Creates a context. `arguments[0]` is the program name.
    pub fn new(root_directory: impl Into<PathBuf>, arguments: Vec<String>) -> Self {
        Self {
            root_directory: root_directory.into(),
            arguments,
            commands: BTreeMap::new(),
            default_command: None,
        }
    }

    /// Creates a context from configuration. The configured default command
    /// only takes effect once a command of that name is registered.
    pub fn from_config(config: &ConsoleConfig, arguments: Vec<String>) -> Result<Self> {
        let mut context = Self::new(config.resolve_root_directory()?, arguments);
        context.default_command = config.default_command.clone();
        Ok(context)
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Resolves `path` against the application root. Leading separators
    /// are ignored, so `/.tmp/a` and `.tmp/a` name the same location.
    pub fn to_local_path(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches(|c: char| c == '/' || c == '\\');
        if relative.is_empty() {
            self.root_directory.clone()
        } else {
            self.root_directory.join(relative)
        }
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn arguments_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn program_name(&self) -> &str {
        self.arguments.first().map(String::as_str).unwrap_or("bgproc")
    }

    /// Registers `factory` under `name`, replacing any previous command of
    /// that name. With `default`, the command also runs when no name is
    /// given.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F, default: bool)
    where
        F: Fn(&ConsoleContext) -> Box<dyn Command> + 'static,
    {
        let name = name.into();
        if default {
            self.default_command = Some(name.clone());
        }
        self.commands.insert(name, Box::new(factory));
    }

    pub fn default_command(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn usage(&self) -> String {
        format!("Usage: {} ({})", self.program_name(), self.command_names().join("|"))
    }

    /// Runs the command named by `argv[1]`, or the default command when no
    /// name is given.
    ///
    /// Without a name and without a default, prints usage and returns -1.
    /// An unknown name is an error. Once a command is resolved, its failures
    /// become its exit status and this returns `Ok`.
    pub fn run(&self) -> Result<i32> {
        let name = match self.arguments.get(1) {
            Some(name) => name.clone(),
            None => match self.default_command.as_ref().filter(|name| !name.is_empty()) {
                Some(name) => name.clone(),
                None => {
                    println!("{}", self.usage());
                    return Ok(-1);
                }
            },
        };

        let mut command = self.resolve(&name)?;
        debug!("Running command '{}'", name);
        Ok(self.execute(command.as_mut()))
    }

    fn resolve(&self, name: &str) -> Result<Box<dyn Command>> {
        let factory = self
            .commands
            .get(name)
            .ok_or_else(|| ConsoleError::command_not_found(name))?;
        Ok(factory(self))
    }

    fn execute(&self, command: &mut dyn Command) -> i32 {
        let status = match command.on_init(self).and_then(|()| command.run(self)) {
            Ok(status) => status,
            Err(e) => {
                error!("{}", e);
                e.exit_code()
            }
        };

        command.on_finish(self);
        status
    }
}

impl fmt::Debug for ConsoleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleContext")
            .field("root_directory", &self.root_directory)
            .field("arguments", &self.arguments)
            .field("commands", &self.command_names())
            .field("default_command", &self.default_command)
            .finish()
    }
}
