use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::diary::YearMonth;
use crate::settings::DEFAULT_SETTINGS_PATH;
use crate::writer::DiaryOwner;

#[derive(Debug, Parser)]
#[command(name = "kanna-diary")]
#[command(about = "Collects the day's activity and writes it up as a diary")]
#[command(version)]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, env = "KANNA_DIARY_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,

    /// Whose diary to read and write
    #[arg(long, global = true, value_enum, default_value = "kanna")]
    pub diary: DiaryOwner,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the daily diary (default)
    Generate {
        /// YYYY-MM-DD, default yesterday
        date: Option<NaiveDate>,
    },

    /// Generate the weekly reflection for the week containing DATE
    Weekly {
        /// YYYY-MM-DD, default yesterday
        date: Option<NaiveDate>,
    },

    /// Generate the monthly reflection
    Monthly {
        /// YYYY-MM, default previous month
        month: Option<YearMonth>,
    },

    /// Print a stored daily diary
    Show {
        /// YYYY-MM-DD, default today
        date: Option<NaiveDate>,
    },

    /// Find daily diaries containing a keyword
    Search { keyword: String },

    /// Count stored daily diaries
    Stats,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_persona_diary_and_no_command() {
        let cli = Cli::try_parse_from(["kanna-diary"]).unwrap();
        assert_eq!(cli.diary, DiaryOwner::Persona);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_dates_and_months() {
        let cli = Cli::try_parse_from(["kanna-diary", "generate", "2025-03-10", "--diary", "user"]).unwrap();
        assert_eq!(cli.diary, DiaryOwner::User);
        assert!(matches!(
            cli.command,
            Some(Commands::Generate { date: Some(d) }) if d == NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        ));

        let cli = Cli::try_parse_from(["kanna-diary", "monthly", "2025-02"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Monthly { month: Some(YearMonth { year: 2025, month: 2 }) })
        ));

        assert!(Cli::try_parse_from(["kanna-diary", "show", "yesterday"]).is_err());
    }
}
