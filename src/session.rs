use crate::error::{ExploreError, Result};
use crate::load::{DatasetLoader, RawTable};
use crate::report::{all_stats, format_page, rule};
use crate::selector::{City, DaySelector, MonthSelector, Selectors};
use crate::structs::PAGE_SIZE;
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

const CITY_PROMPT: &str = "Hello! Let's explore some US bikeshare data!\n\
Would you like to see data for Chicago, New York City or Washington?";
const CITY_RETRY: &str =
    "Incorrect choice, please select data for Chicago, New York City or Washington?";
const RAW_PROMPT: &str = "Would you like to see 5 rows of raw data? \
Enter yes or no to go on and explore US bikeshare data.";
const RAW_MORE: &str = "Would you like to see another 5 rows of raw data? Enter yes or no to continue?";
const MONTH_PROMPT: &str = "Select a month January, February,...June or All";
const MONTH_RETRY: &str = "Incorrect choice, select a month January, February,...June or All";
const DAY_PROMPT: &str = "Select a day Monday, Tuesday,...,Sunday or All";
const DAY_RETRY: &str = "Incorrect choice, select a day Monday, Tuesday,...,Sunday or All";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.";

/// Progress of a single validated prompt.
enum PromptState<T> {
    AwaitingInput,
    Accepted(T),
}

/// Interactive exploration over any line-based input and text output.
pub struct Session<R, W> {
    loader: DatasetLoader,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(loader: DatasetLoader, input: R, output: W) -> Self {
        Self {
            loader,
            input,
            output,
        }
    }

    /// Prints `message` and reads one answer line.
    fn ask(&mut self, message: &str) -> Result<String> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExploreError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until the answer parses as `T`, switching to `retry` after the
    /// first rejected answer.
    pub fn choose<T: FromStr>(&mut self, first: &str, retry: &str) -> Result<T> {
        let mut message = first;
        let mut state = PromptState::AwaitingInput;
        loop {
            state = match state {
                PromptState::Accepted(value) => return Ok(value),
                PromptState::AwaitingInput => {
                    let answer = self.ask(message)?;
                    message = retry;
                    match answer.parse::<T>() {
                        Ok(value) => PromptState::Accepted(value),
                        Err(_) => {
                            debug!("Rejected answer {:?}", answer);
                            PromptState::AwaitingInput
                        }
                    }
                }
            };
        }
    }

    /// True only for a case-insensitive "yes".
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(self.ask(message)?.eq_ignore_ascii_case("yes"))
    }

    /// Shows the raw table five rows at a time while the user keeps asking.
    pub fn page_raw(&mut self, raw: &RawTable) -> Result<()> {
        let mut shown = 0;
        let mut wants_more = self.confirm(RAW_PROMPT)?;
        while wants_more {
            if shown >= raw.len() {
                writeln!(self.output, "End of file!")?;
                break;
            }
            writeln!(self.output, "{}", format_page(raw, shown, PAGE_SIZE))?;
            shown += PAGE_SIZE;
            if shown >= raw.len() {
                writeln!(self.output, "End of file!")?;
                break;
            }
            wants_more = self.confirm(RAW_MORE)?;
        }
        Ok(())
    }

    /// One full pass: choose, preview, filter and report.
    pub fn round(&mut self) -> Result<()> {
        let city: City = self.choose(CITY_PROMPT, CITY_RETRY)?;
        let raw = self.loader.load_raw(city)?;
        self.page_raw(&raw)?;

        let month: MonthSelector = self.choose(MONTH_PROMPT, MONTH_RETRY)?;
        let day: DaySelector = self.choose(DAY_PROMPT, DAY_RETRY)?;
        rule(&mut self.output)?;

        let dataset = self.loader.load_from(city, &raw, Selectors::new(month, day))?;
        debug!(
            "Exploring {} trips for {} (month={}, day={})",
            dataset.len(),
            city,
            month,
            day
        );
        all_stats(&mut self.output, &dataset)?;
        Ok(())
    }

    /// Repeats rounds until the user declines to restart.
    ///
    /// Running out of input ends the session quietly.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.round() {
                Ok(()) => {}
                Err(ExploreError::InputClosed) => {
                    debug!("Input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
            match self.confirm(RESTART_PROMPT) {
                Ok(true) => continue,
                Ok(false) | Err(ExploreError::InputClosed) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::CityTable;

    fn session<'a>(input: &'a str, output: &'a mut Vec<u8>) -> Session<&'a [u8], &'a mut Vec<u8>> {
        let loader = DatasetLoader::new(CityTable::from_paths(Vec::new()));
        Session::new(loader, input.as_bytes(), output)
    }

    fn table(rows: usize) -> RawTable {
        let mut csv = String::from("Start Station\n");
        for i in 0..rows {
            csv.push_str(&format!("S{}\n", i));
        }
        RawTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_choose_reprompts_until_valid() {
        let mut out = Vec::new();
        let city: City = session("boston\nparis\nWashington\n", &mut out)
            .choose(CITY_PROMPT, CITY_RETRY)
            .unwrap();
        assert_eq!(city, City::Washington);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Hello!").count(), 1);
        assert_eq!(text.matches("Incorrect choice").count(), 2);
    }

    #[test]
    fn test_choose_reports_closed_input() {
        let mut out = Vec::new();
        let result: Result<MonthSelector> =
            session("july\n", &mut out).choose(MONTH_PROMPT, MONTH_RETRY);
        assert!(matches!(result, Err(ExploreError::InputClosed)));
    }

    #[test]
    fn test_confirm_is_case_insensitive() {
        let mut out = Vec::new();
        let mut s = session("YES\nno\ny\n", &mut out);
        assert!(s.confirm("?").unwrap());
        assert!(!s.confirm("?").unwrap());
        assert!(!s.confirm("?").unwrap());
    }

    #[test]
    fn test_page_raw_declined() {
        let mut out = Vec::new();
        session("no\n", &mut out).page_raw(&table(12)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("S0"));
    }

    #[test]
    fn test_page_raw_stops_at_end_of_file() {
        let mut out = Vec::new();
        // two pages cover 7 rows; no third question is asked
        session("yes\nyes\n", &mut out).page_raw(&table(7)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("S0") && text.contains("S6"));
        assert_eq!(text.matches("another 5 rows").count(), 1);
        assert!(text.trim_end().ends_with("End of file!"));
    }

    #[test]
    fn test_page_raw_exact_multiple_has_no_empty_page() {
        let mut out = Vec::new();
        session("yes\nyes\n", &mut out).page_raw(&table(10)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("Start Station").count(), 2);
        assert_eq!(text.matches("End of file!").count(), 1);
    }

    #[test]
    fn test_page_raw_stops_when_user_declines() {
        let mut out = Vec::new();
        session("yes\nno\n", &mut out).page_raw(&table(12)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("S4"));
        assert!(!text.contains("S5"));
        assert!(!text.contains("End of file!"));
    }

    #[test]
    fn test_page_raw_empty_table() {
        let mut out = Vec::new();
        session("yes\n", &mut out).page_raw(&table(0)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("End of file!"));
    }
}
