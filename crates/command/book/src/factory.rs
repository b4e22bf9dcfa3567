//! Builds commands from routine names and string arguments.
//!
//! All argument validation happens here, before a command is ever scheduled.

use std::collections::BTreeMap;
use std::str::FromStr;

use command_core::{
    Command, ConfigError, Position, validate_coordinate, validate_nonnegative_int,
};

use crate::KeyBindings;
use crate::commands::{Adjust, FlashJump, buff, celestial_roar, erda_fountain, supernova};
use crate::movement::Moves;

/// Every command name a routine may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CommandKind {
    Adjust,
    Buff,
    FlashJump,
    CelestialRoar,
    Supernova,
    ErdaFountain,
}

impl CommandKind {
    fn parameters(self) -> &'static [&'static str] {
        match self {
            CommandKind::Adjust => &["x", "y", "max_steps"],
            CommandKind::Buff => &[],
            CommandKind::FlashJump => &["direction"],
            CommandKind::CelestialRoar => &["attacks", "repetitions"],
            CommandKind::Supernova | CommandKind::ErdaFountain => &["direction"],
        }
    }
}

/// Command factory bound to one set of key bindings.
#[derive(Clone, Debug)]
pub struct CommandBook {
    bindings: KeyBindings,
    default_max_steps: u32,
}

impl CommandBook {
    pub const DEFAULT_ATTACKS: u32 = 2;
    pub const DEFAULT_REPETITIONS: u32 = 1;

    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            default_max_steps: command_core::Settings::DEFAULT_MAX_STEPS,
        }
    }

    /// Step budget used by `adjust` when the routine does not set `max_steps`.
    pub fn with_default_max_steps(mut self, steps: u32) -> Self {
        self.default_max_steps = steps;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn moves(&self) -> Moves {
        Moves::from_bindings(&self.bindings)
    }

    /// Builds the command `name` from `key = value` arguments.
    pub fn build(
        &self,
        name: &str,
        args: &BTreeMap<String, String>,
    ) -> Result<Box<dyn Command>, ConfigError> {
        let kind = CommandKind::from_str(name.trim())
            .map_err(|_| ConfigError::UnknownCommand(name.to_string()))?;
        let args = Args::new(kind, args)?;

        let command: Box<dyn Command> = match kind {
            CommandKind::Adjust => {
                let x = validate_coordinate("x", args.required("x")?)?;
                let y = validate_coordinate("y", args.required("y")?)?;
                let max_steps = args
                    .optional("max_steps")
                    .map(|raw| validate_nonnegative_int("max_steps", raw))
                    .transpose()?
                    .unwrap_or(self.default_max_steps);
                Box::new(Adjust::new(Position::new(x, y), max_steps, self.moves()))
            }
            CommandKind::Buff => Box::new(buff(&self.bindings)),
            CommandKind::FlashJump => {
                Box::new(FlashJump::parse(args.required("direction")?, self.moves())?)
            }
            CommandKind::CelestialRoar => {
                let attacks = args.count("attacks", Self::DEFAULT_ATTACKS)?;
                let repetitions = args.count("repetitions", Self::DEFAULT_REPETITIONS)?;
                Box::new(celestial_roar(&self.bindings, attacks, repetitions))
            }
            CommandKind::Supernova => {
                Box::new(supernova(&self.bindings, args.optional("direction"))?)
            }
            CommandKind::ErdaFountain => {
                Box::new(erda_fountain(&self.bindings, args.optional("direction"))?)
            }
        };

        tracing::debug!(command = %kind, "command built");
        Ok(command)
    }
}

impl Default for CommandBook {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

/// Arguments checked against the parameters a command accepts.
struct Args<'a> {
    kind: CommandKind,
    values: &'a BTreeMap<String, String>,
}

impl<'a> Args<'a> {
    fn new(kind: CommandKind, values: &'a BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let accepted = kind.parameters();
        if let Some(unexpected) = values.keys().find(|key| !accepted.contains(&key.as_str())) {
            return Err(ConfigError::UnexpectedArgument {
                command: kind.to_string(),
                argument: unexpected.clone(),
            });
        }
        Ok(Self { kind, values })
    }

    fn optional(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).map(String::as_str)
    }

    fn required(&self, name: &'static str) -> Result<&'a str, ConfigError> {
        self.optional(name).ok_or(ConfigError::MissingArgument {
            command: self.kind.to_string(),
            argument: name,
        })
    }

    fn count(&self, name: &'static str, default: u32) -> Result<u32, ConfigError> {
        match self.optional(name) {
            Some(raw) => validate_nonnegative_int(name, raw),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn builds_every_command_kind() {
        let book = CommandBook::default();
        let cases = [
            ("adjust", args(&[("x", "0.5"), ("y", "0.3")])),
            ("Buff", args(&[])),
            ("flash_jump", args(&[("direction", "up")])),
            ("celestial_roar", args(&[("attacks", "3")])),
            ("supernova", args(&[])),
            ("ERDA_FOUNTAIN", args(&[("direction", "right")])),
        ];

        for (name, values) in cases {
            let command = book.build(name, &values).unwrap();
            assert_eq!(command.name(), name.to_ascii_lowercase());
        }
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let err = CommandBook::default()
            .build("teleport", &args(&[]))
            .err()
            .unwrap();
        assert_eq!(err, ConfigError::UnknownCommand("teleport".to_string()));
    }

    #[test]
    fn directional_arguments_are_validated() {
        let book = CommandBook::default();
        assert!(matches!(
            book.build("flash_jump", &args(&[("direction", "diagonal")])),
            Err(ConfigError::InvalidDirection { .. })
        ));
        assert!(matches!(
            book.build("supernova", &args(&[("direction", "up")])),
            Err(ConfigError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn counts_must_be_non_negative_integers() {
        let book = CommandBook::default();
        assert!(matches!(
            book.build("celestial_roar", &args(&[("attacks", "-2")])),
            Err(ConfigError::InvalidCount { name: "attacks", .. })
        ));
        assert!(matches!(
            book.build("adjust", &args(&[("x", "0.5"), ("y", "0.5"), ("max_steps", "2.5")])),
            Err(ConfigError::InvalidCount { name: "max_steps", .. })
        ));
    }

    #[test]
    fn missing_and_unexpected_arguments_are_reported() {
        let book = CommandBook::default();
        assert_eq!(
            book.build("adjust", &args(&[("x", "0.5")])).err(),
            Some(ConfigError::MissingArgument {
                command: "adjust".to_string(),
                argument: "y",
            })
        );
        assert_eq!(
            book.build("buff", &args(&[("direction", "left")])).err(),
            Some(ConfigError::UnexpectedArgument {
                command: "buff".to_string(),
                argument: "direction".to_string(),
            })
        );
    }
}
