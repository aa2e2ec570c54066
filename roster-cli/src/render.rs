//! User-facing text for the interactive session.
//!
//! Every function writes to any [`Write`] so the exact output can be checked
//! in tests.

use std::io::{self, Write};

use roster_core::error::RosterError;
use roster_core::store::SaveStatus;
use roster_core::types::{CharacterClass, CharacterRecord};

const RULE_WIDTH: usize = 44;

/// The main menu.
///
/// # Errors
/// Propagates write failures.
pub fn menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== THE TOWER: CHARACTER ROSTER ===")?;
    writeln!(out, "1. Create character")?;
    writeln!(out, "2. Find character")?;
    writeln!(out, "3. Rename character")?;
    writeln!(out, "4. Delete character")?;
    writeln!(out, "5. List characters")?;
    writeln!(out, "6. Quit")
}

/// The class sub-menu, generated from the class table.
///
/// # Errors
/// Propagates write failures.
pub fn class_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Available classes:")?;
    for class in CharacterClass::ALL {
        let stats = class.stats();
        writeln!(
            out,
            "{}. {} ({}) - HP {} / ATK {} / SPD {}",
            class.selection(),
            class,
            class.description(),
            stats.health,
            stats.attack,
            stats.speed
        )?;
    }
    Ok(())
}

/// The Hero/Enemy sub-menu.
///
/// # Errors
/// Propagates write failures.
pub fn variant_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Character type:")?;
    writeln!(out, "1. Hero")?;
    writeln!(out, "2. Enemy (grants a reward when defeated)")
}

/// Full sheet for a single record.
///
/// # Errors
/// Propagates write failures.
pub fn character_sheet<W: Write>(out: &mut W, record: &CharacterRecord) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- CHARACTER SHEET ---")?;
    writeln!(out, "Name:    {}", record.name)?;
    writeln!(out, "Class:   {}", record.class)?;
    writeln!(out, "Type:    {}", record.kind.variant())?;
    writeln!(out, "Health:  {}", record.stats.health)?;
    writeln!(out, "Attack:  {}", record.stats.attack)?;
    writeln!(out, "Speed:   {}", record.stats.speed)?;
    if let Some(reward) = record.kind.reward_value() {
        writeln!(out, "Reward:  {reward}")?;
    }
    Ok(())
}

/// Table of every record, in roster order.
///
/// # Errors
/// Propagates write failures.
pub fn roster_table<W: Write>(out: &mut W, records: &[CharacterRecord]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- CHARACTER LIST ---")?;
    if records.is_empty() {
        writeln!(out, "No characters have been created yet.")?;
    } else {
        writeln!(out, "{:<16} {:<8} {:<6} {:>6}", "NAME", "CLASS", "TYPE", "HEALTH")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for record in records {
            writeln!(
                out,
                "{:<16} {:<8} {:<6} {:>6}",
                record.name,
                record.class.name(),
                record.kind.variant().to_string(),
                record.stats.health
            )?;
        }
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Confirmation for a newly created record.
///
/// # Errors
/// Propagates write failures.
pub fn created<W: Write>(out: &mut W, record: &CharacterRecord) -> io::Result<()> {
    writeln!(
        out,
        "--> Character created! {} is a {} {}.",
        record.name,
        record.class,
        record.kind.variant().to_string().to_lowercase()
    )
}

/// Tell the user when a change could not be written to disk.
///
/// # Errors
/// Propagates write failures.
pub fn save_notice<W: Write>(out: &mut W, status: &SaveStatus) -> io::Result<()> {
    match status {
        SaveStatus::Saved => Ok(()),
        SaveStatus::Failed(reason) => writeln!(
            out,
            "Warning: the roster could not be saved ({reason}). The change only lasts for this session."
        ),
    }
}

/// Report a failed request.
///
/// # Errors
/// Propagates write failures.
pub fn error<W: Write>(out: &mut W, err: &RosterError) -> io::Result<()> {
    writeln!(out, "Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn menu_lists_six_options() {
        let out = text(|w| menu(w));
        for n in 1..=6 {
            assert!(out.contains(&format!("{n}. ")), "missing option {n}");
        }
    }

    #[test]
    fn class_menu_shows_stats() {
        let out = text(|w| class_menu(w));
        assert!(out.contains("1. Human (Balanced) - HP 60 / ATK 15 / SPD 20"));
        assert!(out.contains("2. Tank (Tough but slow) - HP 70 / ATK 20 / SPD 10"));
        assert!(out.contains("3. Goblin (Very fast) - HP 50 / ATK 15 / SPD 30"));
    }

    #[test]
    fn sheet_shows_reward_only_for_enemies() {
        let hero = CharacterRecord::hero("Aria", CharacterClass::Human);
        let out = text(|w| character_sheet(w, &hero));
        assert!(out.contains("Name:    Aria"));
        assert!(out.contains("Speed:   20"));
        assert!(!out.contains("Reward"));

        let enemy = CharacterRecord::enemy("Grub", CharacterClass::Goblin, 25);
        let out = text(|w| character_sheet(w, &enemy));
        assert!(out.contains("Type:    Enemy"));
        assert!(out.contains("Reward:  25"));
    }

    #[test]
    fn empty_table_has_notice() {
        let out = text(|w| roster_table(w, &[]));
        assert!(out.contains("No characters have been created yet."));
        assert!(!out.contains("NAME"));
    }

    #[test]
    fn table_rows_in_order() {
        let records = vec![
            CharacterRecord::hero("Aria", CharacterClass::Human),
            CharacterRecord::enemy("Grub", CharacterClass::Goblin, 5),
        ];
        let out = text(|w| roster_table(w, &records));
        let aria = out.find("Aria").expect("aria row");
        let grub = out.find("Grub").expect("grub row");
        assert!(aria < grub);
        assert!(out.contains(&format!("{:<16} {:<8} {:<6} {:>6}", "Grub", "Goblin", "Enemy", 50)));
    }

    #[test]
    fn save_notice_only_on_failure() {
        assert!(text(|w| save_notice(w, &SaveStatus::Saved)).is_empty());
        let out = text(|w| save_notice(w, &SaveStatus::Failed("disk full".into())));
        assert!(out.contains("disk full"));
    }
}
