//! The interactive menu loop.
//!
//! A [`Session`] owns the [`RecordStore`] for its whole lifetime and talks to
//! the user through any `BufRead`/`Write` pair. User mistakes abort only the
//! current operation; the loop ends on Quit or end of input.

use std::io::{self, BufRead, Write};

use roster_core::error::RosterError;
use roster_core::store::{RecordStore, Removal};
use roster_core::types::{CharacterClass, VariantKind};
use tracing::{info, warn};

use crate::render;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1 — create a character.
    Create,
    /// 2 — show one character.
    Find,
    /// 3 — rename a character.
    Rename,
    /// 4 — delete a character.
    Delete,
    /// 5 — list every character.
    List,
    /// 6 — end the session.
    Quit,
}

impl MenuChoice {
    /// Parse a menu selection as typed by the user.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::Find),
            "3" => Some(Self::Rename),
            "4" => Some(Self::Delete),
            "5" => Some(Self::List),
            "6" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// An interactive roster session.
#[derive(Debug)]
pub struct Session<R, W> {
    store: RecordStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Start a session over `store`.
    pub fn new(store: RecordStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// The roster as it currently stands.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// End the session, handing back the store and the output sink.
    pub fn into_parts(self) -> (RecordStore, W) {
        (self.store, self.output)
    }

    /// Run the menu loop until Quit or end of input.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures are returned; every roster error is
    /// reported to the user and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            path = %self.store.path().display(),
            records = self.store.len(),
            "Session started"
        );

        loop {
            render::menu(&mut self.output)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };
            match MenuChoice::parse(&line) {
                Some(MenuChoice::Quit) => {
                    writeln!(self.output, "Goodbye.")?;
                    break;
                }
                Some(choice) => self.dispatch(choice)?,
                None => {
                    warn!(selection = %line, "Unknown menu selection");
                    writeln!(self.output, "That option does not exist, try again.")?;
                }
            }
        }

        info!(records = self.store.len(), "Session ended");
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::Create => self.create(),
            MenuChoice::Find => self.find(),
            MenuChoice::Rename => self.rename(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::List => render::roster_table(&mut self.output, self.store.records()),
            MenuChoice::Quit => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    fn create(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- CREATE CHARACTER ---")?;
        let Some(name) = self.prompt("Enter your character's name: ")? else {
            return Ok(());
        };
        let name = match self.store.check_name_available(&name) {
            Ok(name) => name,
            Err(e) => return render::error(&mut self.output, &e),
        };

        render::class_menu(&mut self.output)?;
        let Some(class_selection) = self.prompt_number("Choose a class (1-3): ")? else {
            return Ok(());
        };
        if CharacterClass::from_selection(class_selection).is_none() {
            return self.input_error(RosterError::InvalidClass {
                selection: class_selection,
            });
        }

        render::variant_menu(&mut self.output)?;
        let Some(variant_selection) = self.prompt_number("Choose a type (1-2): ")? else {
            return Ok(());
        };
        let Some(variant) = VariantKind::from_selection(variant_selection) else {
            return self.input_error(RosterError::InvalidVariant {
                selection: variant_selection,
            });
        };

        let reward_value = match variant {
            VariantKind::Hero => None,
            VariantKind::Enemy => {
                let Some(reward) = self.prompt_number("Reward for defeating it: ")? else {
                    return Ok(());
                };
                // Negative or oversized rewards become "no reward" and are rejected below.
                Some(u32::try_from(reward).unwrap_or(0))
            }
        };

        match self
            .store
            .insert(&name, class_selection, variant, reward_value)
        {
            Ok(created) => {
                render::created(&mut self.output, &created.value)?;
                render::save_notice(&mut self.output, &created.save)
            }
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    fn find(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("\nName of the character to find: ")? else {
            return Ok(());
        };
        match self.store.find_by_name(&name) {
            Ok(record) => render::character_sheet(&mut self.output, record),
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    fn rename(&mut self) -> io::Result<()> {
        let Some(current) = self.prompt("\nWhich character do you want to rename?: ")? else {
            return Ok(());
        };
        let current = match self.store.resolve(&current, "rename") {
            Ok(record) => record.name.clone(),
            Err(e) => return render::error(&mut self.output, &e),
        };
        writeln!(self.output, "Renaming: {current}")?;

        let Some(new_name) = self.prompt("Enter the new name: ")? else {
            return Ok(());
        };
        match self.store.rename(&current, &new_name) {
            Ok(renamed) => {
                writeln!(self.output, "Name changed to {}.", renamed.value.name)?;
                render::save_notice(&mut self.output, &renamed.save)
            }
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("\nWhich character do you want to delete?: ")? else {
            return Ok(());
        };
        let target = match self.store.resolve(&name, "delete") {
            Ok(record) => record.name.clone(),
            Err(e) => return render::error(&mut self.output, &e),
        };

        let Some(answer) = self.prompt(&format!("Are you sure you want to delete {target}? (y/n): "))?
        else {
            return Ok(());
        };
        let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

        match self.store.delete(&target, confirmed) {
            Ok(Removal::Deleted(removed)) => {
                writeln!(self.output, "{} has been deleted.", removed.value.name)?;
                render::save_notice(&mut self.output, &removed.save)
            }
            Ok(Removal::Cancelled) => writeln!(self.output, "Operation cancelled."),
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    // ------------------------------------------------------------------
    // Input helpers
    // ------------------------------------------------------------------

    /// Print `text` and read one line. `None` means end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Like [`Self::prompt`] but parses an integer. A non-numeric answer is
    /// reported and yields `None`, aborting the current operation.
    fn prompt_number(&mut self, text: &str) -> io::Result<Option<i64>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        match line.trim().parse::<i64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                self.input_error(RosterError::InvalidNumber { input: line })?;
                Ok(None)
            }
        }
    }

    /// Log and report a user mistake caught by the session itself.
    fn input_error(&mut self, err: RosterError) -> io::Result<()> {
        warn!(error = %err, "Request rejected");
        render::error(&mut self.output, &err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Create));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::List));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("quit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
