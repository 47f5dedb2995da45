//! Step-by-step record of the arithmetic behind a key derivation,
//! encryption or decryption.
//!
//! Traces are descriptive only. Nothing in the engine reads them back;
//! they exist so a UI can show each step and tests can audit it.

use std::fmt;

use serde::Serialize;

/// What a trace step operated on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceInput {
    /// A named key parameter (`n`, `φ(n)`, `e`, `d`).
    Parameter { name: &'static str },
    /// A plaintext character and its code point.
    Character { character: char, code: u64 },
    /// One ciphertext integer.
    Ciphertext { value: u64 },
}

impl fmt::Display for TraceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter { name } => write!(f, "{}", name),
            Self::Character { character, code } => write!(f, "{:?} ({})", character, code),
            Self::Ciphertext { value } => write!(f, "{}", value),
        }
    }
}

/// One narrated arithmetic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    pub input: TraceInput,
    pub formula: String,
    pub result: u64,
    /// Character recovered by this step (decryption only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<char>,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.input, self.formula, self.result)?;
        if let Some(ch) = self.output {
            write!(f, " -> {:?}", ch)?;
        }
        Ok(())
    }
}

/// Ordered list of trace records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepTrace {
    records: Vec<TraceRecord>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, input: TraceInput, formula: String, result: u64, output: Option<char>) {
        self.records.push(TraceRecord {
            input,
            formula,
            result,
            output,
        });
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a TraceRecord;
    type IntoIter = std::slice::Iter<'a, TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for StepTrace {
    type Item = TraceRecord;
    type IntoIter = std::vec::IntoIter<TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Renders one line per record.
impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_one_line_per_record() {
        let mut trace = StepTrace::new();
        trace.push(TraceInput::Parameter { name: "n" }, "p * q = 11 * 13".into(), 143, None);
        trace.push(
            TraceInput::Character { character: 'H', code: 72 },
            "72^7 mod 143".into(),
            19,
            None,
        );
        trace.push(TraceInput::Ciphertext { value: 19 }, "19^103 mod 143".into(), 72, Some('H'));

        let rendered = trace.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "n: p * q = 11 * 13 = 143",
                "'H' (72): 72^7 mod 143 = 19",
                "19: 19^103 mod 143 = 72 -> 'H'",
            ]
        );
    }

    #[test]
    fn test_serializes_as_record_array() {
        let mut trace = StepTrace::new();
        trace.push(TraceInput::Ciphertext { value: 19 }, "19^103 mod 143".into(), 72, Some('H'));

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "input": { "kind": "ciphertext", "value": 19 },
                "formula": "19^103 mod 143",
                "result": 72,
                "output": "H",
            }])
        );
    }

    #[test]
    fn test_empty_trace() {
        let trace = StepTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.to_string(), "");
    }
}
