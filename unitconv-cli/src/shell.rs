//! Interactive conversion shell
//!
//! Prompts for a category, a value and two units, re-prompting on invalid
//! entries, then prints the result. Engine errors end the current attempt
//! but never the session.

use std::io::{self, BufRead, Write};
use serde::Serialize;
use unitconv_core::{normalize_name, Category, ConversionError};
use unitconv_units::ConversionEngine;
use crate::config::{OutputFormat, ShellConfig};

/// A completed conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRecord {
    pub category: Category,
    pub value: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

/// Result of one conversion attempt
#[derive(Debug)]
pub enum Outcome {
    Converted(ConversionRecord),
    Failed(ConversionError),
    /// Input ended before the attempt was complete
    EndOfInput,
}

pub struct Shell<'a, R, W> {
    engine: &'a ConversionEngine,
    config: ShellConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(engine: &'a ConversionEngine, config: ShellConfig, input: R, output: W) -> Self {
        Shell { engine, config, input, output }
    }

    /// Run conversions until the user declines another or input ends.
    /// Returns the number of successful conversions.
    pub fn run(&mut self) -> io::Result<usize> {
        writeln!(self.output, "Welcome to the Unit Converter!")?;
        self.print_categories()?;

        let mut converted = 0;
        loop {
            match self.convert_once()? {
                Outcome::Converted(record) => {
                    converted += 1;
                    tracing::info!(category = %record.category, from = %record.from, to = %record.to, "conversion complete");
                }
                Outcome::Failed(e) => tracing::debug!(code = e.code(), "attempt ended with error"),
                Outcome::EndOfInput => break,
            }
            if !self.confirm("\nConvert another value? (y/n): ")? {
                break;
            }
        }
        Ok(converted)
    }

    /// Collect one (category, value, from, to) and convert it
    pub fn convert_once(&mut self) -> io::Result<Outcome> {
        let Some(category) = self.prompt_category()? else {
            return Ok(Outcome::EndOfInput);
        };
        let units = self.units_of(category);

        writeln!(self.output, "\nSupported units for '{}': {}", category, units.join(", "))?;
        writeln!(self.output, "Tip: {}", self.engine.suggest_units(category.as_str()))?;

        let Some(value) = self.prompt_value()? else {
            return Ok(Outcome::EndOfInput);
        };

        let source_example = units.first().copied().unwrap_or_default();
        let Some(from) = self.prompt_unit(category, "source", source_example)? else {
            return Ok(Outcome::EndOfInput);
        };

        let target_example = units.get(1).copied().unwrap_or(source_example);
        let Some(to) = self.prompt_unit(category, "target", target_example)? else {
            return Ok(Outcome::EndOfInput);
        };

        match self.engine.convert(value, &from, &to, category.as_str()) {
            Ok(result) => {
                let record = ConversionRecord { category, value, from, to, result };
                self.print_result(&record)?;
                Ok(Outcome::Converted(record))
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "conversion failed");
                self.print_error(&e)?;
                Ok(Outcome::Failed(e))
            }
        }
    }

    fn units_of(&self, category: Category) -> Vec<&'static str> {
        self.engine
            .get_supported_units(category.as_str())
            .unwrap_or_default()
    }

    fn print_categories(&mut self) -> io::Result<()> {
        let categories = self.engine.get_supported_categories();
        writeln!(self.output, "Supported categories: {}", categories.join(", "))
    }

    /// Write a prompt and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_category(&mut self) -> io::Result<Option<Category>> {
        loop {
            let Some(raw) = self.read_line("Enter the category of units (e.g., length, mass, temperature): ")? else {
                return Ok(None);
            };
            match self.engine.category(&raw) {
                Ok(category) => return Ok(Some(category)),
                Err(e) => {
                    tracing::debug!(input = %raw, error = %e, "rejected category");
                    writeln!(
                        self.output,
                        "Category '{}' is not supported. Please try again.",
                        normalize_name(&raw)
                    )?;
                    self.print_categories()?;
                }
            }
        }
    }

    fn prompt_value(&mut self) -> io::Result<Option<f64>> {
        loop {
            let Some(raw) = self.read_line("\nEnter the value you want to convert: ")? else {
                return Ok(None);
            };
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(Some(value)),
                _ => {
                    tracing::debug!(input = %raw, "rejected value");
                    writeln!(self.output, "Invalid input. Please enter a numeric value.")?;
                }
            }
        }
    }

    fn prompt_unit(&mut self, category: Category, role: &str, example: &str) -> io::Result<Option<String>> {
        let prompt = format!("Enter the {} unit (e.g., {}): ", role, example);
        loop {
            let Some(raw) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            let unit = normalize_name(&raw);
            if self.engine.has_unit(category.as_str(), &unit) {
                return Ok(Some(unit));
            }
            tracing::debug!(input = %raw, %category, "rejected unit");
            writeln!(
                self.output,
                "Unit '{}' is not supported for category '{}'. Please try again.",
                unit, category
            )?;
            let units = self.units_of(category);
            writeln!(self.output, "Supported units: {}", units.join(", "))?;
        }
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(matches!(
            self.read_line(prompt)?.map(|a| normalize_name(&a)).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    fn print_result(&mut self, record: &ConversionRecord) -> io::Result<()> {
        match self.config.output {
            OutputFormat::Text => writeln!(
                self.output,
                "\nConversion Result: {} {} = {:.*} {}",
                record.value, record.from, self.config.precision, record.result, record.to
            ),
            OutputFormat::Json => {
                let json = serde_json::to_string(record)?;
                writeln!(self.output, "{}", json)
            }
        }
    }

    fn print_error(&mut self, err: &ConversionError) -> io::Result<()> {
        match self.config.output {
            OutputFormat::Text => writeln!(self.output, "Error during conversion: {}", err),
            OutputFormat::Json => {
                let json = serde_json::to_string(&err.report())?;
                writeln!(self.output, "{}", json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str, config: ShellConfig) -> (usize, String) {
        let engine = ConversionEngine::new().unwrap();
        let mut output = Vec::new();
        let converted = {
            let mut shell = Shell::new(&engine, config, Cursor::new(input.as_bytes()), &mut output);
            shell.run().unwrap()
        };
        (converted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_miles_to_kilometers() {
        let (n, out) = run_session("length\n5\nmile\nkilometer\nn\n", ShellConfig::default());
        assert_eq!(n, 1);
        assert!(out.starts_with("Welcome to the Unit Converter!\n"));
        assert!(out.contains("Supported categories: length, mass, temperature, time, volume"));
        assert!(out.contains("Tip: Common units: meter, kilometer, inch, foot, mile"));
        assert!(out.contains("Conversion Result: 5 mile = 8.0467 kilometer"));
    }

    #[test]
    fn test_reprompts_on_invalid_entries() {
        let input = "bogus\n  TEMPERATURE \nwarm\n98.6\nrankine\nFahrenheit\nmeter\ncelsius\n";
        let (n, out) = run_session(input, ShellConfig::default());
        assert_eq!(n, 1);
        assert!(out.contains("Category 'bogus' is not supported. Please try again."));
        assert!(out.contains("Invalid input. Please enter a numeric value."));
        assert!(out.contains("Unit 'rankine' is not supported for category 'temperature'. Please try again."));
        assert!(out.contains("Unit 'meter' is not supported for category 'temperature'."));
        assert!(out.contains("Supported units: celsius, fahrenheit, kelvin"));
        assert!(out.contains("Conversion Result: 98.6 fahrenheit = 37.0000 celsius"));
    }

    #[test]
    fn test_unit_prompts_show_examples() {
        let (_, out) = run_session("mass\n1\n", ShellConfig::default());
        assert!(out.contains("Enter the source unit (e.g., kilogram): "));
        assert!(!out.contains("Enter the target unit"));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let (n, out) = run_session("time\ninf\nNaN\n2\nhour\nminute\n", ShellConfig::default());
        assert_eq!(n, 1);
        assert_eq!(out.matches("Invalid input. Please enter a numeric value.").count(), 2);
        assert!(out.contains("Conversion Result: 2 hour = 120.0000 minute"));
    }

    #[test]
    fn test_multiple_conversions() {
        let input = "volume\n1\ngallon\nliter\nyes\nmass\n1000\ngram\nkilogram\nno\n";
        let (n, out) = run_session(input, ShellConfig::default());
        assert_eq!(n, 2);
        assert!(out.contains("Conversion Result: 1 gallon = 3.7854 liter"));
        assert!(out.contains("Conversion Result: 1000 gram = 1.0000 kilogram"));
    }

    #[test]
    fn test_end_of_input_is_clean() {
        let (n, out) = run_session("", ShellConfig::default());
        assert_eq!(n, 0);
        assert!(out.ends_with("Enter the category of units (e.g., length, mass, temperature): "));
    }

    #[test]
    fn test_precision_setting() {
        let config = ShellConfig { precision: 1, ..ShellConfig::default() };
        let (_, out) = run_session("temperature\n0\ncelsius\nkelvin\n", config);
        assert!(out.contains("Conversion Result: 0 celsius = 273.1 kelvin")
            || out.contains("Conversion Result: 0 celsius = 273.2 kelvin"));
    }

    #[test]
    fn test_json_output() {
        let config = ShellConfig { output: OutputFormat::Json, ..ShellConfig::default() };
        let (_, out) = run_session("time\n1\nweek\nday\n", config);
        let line = out
            .lines()
            .find(|l| l.starts_with('{'))
            .expect("json result line");
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(json["category"], "time");
        assert_eq!(json["from"], "week");
        assert_eq!(json["to"], "day");
        assert_eq!(json["result"], 7.0);
    }

    #[test]
    fn test_engine_error_is_printed() {
        let engine = ConversionEngine::new().unwrap();
        let mut output = Vec::new();
        let mut shell = Shell::new(&engine, ShellConfig::default(), Cursor::new(&b""[..]), &mut output);
        let err = ConversionError::UnknownCategory("bogus".to_string());
        shell.print_error(&err).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert_eq!(out, "Error during conversion: Category 'bogus' not supported.\n");
    }
}
