//! Timing harnesses: repeated nested lookups, and indexed array access
//! compared with [`ArraySteps`].

use crate::accessor::{int_value, read_int};
use crate::document::{ArraySteps, JsonType, ReadError};
use crate::query::Evaluator;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Document used by [`speed_test`].
pub const SPEED_JSON: &str = r#"{
  "astring": "This is a string",
  "number1": 42,
  "number2":  -123.45,
  "anObject":{"one":1,"two":{"obj2.1":21,"obj2.2":22},"three":333},
  "anArray":[0, "one", {"two.0":20,"two.1":21}, 3, [4,44,444]],
  "isnull":null,
  "test": [ 0,1,2,3,4,
            {"ZERO":0, "ONE":1, "TWO":2, "THREE":3,
             "TEST":[0,"one","two",1234]
            },
            6,7
          ],
  "yes": true,
  "no":  false
}
"#;

/// Query run by [`speed_test`]; it resolves to 1234.
pub const SPEED_QUERY: &str = "{'test' [5 {'TEST' [3";

const SPEED_EXPECTED: i32 = 1234;

/// Query run per element by [`long_test`].
pub const LONG_QUERY: &str = "[*{'Users'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedReport {
    pub runs: u64,
    pub elapsed: Duration,
    /// Runs that did not produce the expected value.
    pub failures: u64,
}

impl SpeedReport {
    pub fn per_query(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.elapsed.div_f64(self.runs as f64)
        }
    }
}

/// Runs [`SPEED_QUERY`] against [`SPEED_JSON`] `runs` times.
pub fn speed_test(runs: u64) -> SpeedReport {
    let json = SPEED_JSON.as_bytes();
    let mut failures = 0;
    let start = Instant::now();
    for _ in 0..runs {
        if read_int(json, SPEED_QUERY, &[]) != Ok(SPEED_EXPECTED) {
            failures += 1;
        }
    }
    SpeedReport {
        runs,
        elapsed: start.elapsed(),
        failures,
    }
}

pub fn write_speed_report<W: Write>(out: &mut W, report: &SpeedReport) -> io::Result<()> {
    writeln!(out, "Query: {}", SPEED_QUERY)?;
    writeln!(
        out,
        "Ran {} times in {:.3?} (av. {:.2?}/query)",
        report.runs,
        report.elapsed,
        report.per_query()
    )?;
    if report.failures > 0 {
        writeln!(out, "{} runs returned the wrong value", report.failures)?;
    }
    Ok(())
}

/// Builds an array of `count` user records, each with a `Users` count.
pub fn generate_users(count: usize) -> String {
    let mut json = String::with_capacity(count * 48 + 2);
    json.push('[');
    for i in 0..count {
        if i > 0 {
            json.push_str(",\n");
        }
        // Writing to a String cannot fail.
        let _ = write!(
            json,
            r#"{{"Id": {}, "Name": "group{}", "Users": {}}}"#,
            i,
            i,
            (i * 37) % 1000
        );
    }
    json.push_str("]\n");
    json
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongReport {
    pub elements: usize,
    /// Time to read every element once with an indexed query.
    pub indexed: Duration,
    pub iterations: u64,
    /// Time for `iterations` full traversals with [`ArraySteps`].
    pub stepped: Duration,
    /// `Users` values read by the indexed pass.
    pub users: Vec<i32>,
    /// Elements where the stepped pass read a different value.
    pub mismatches: usize,
}

/// Reads `Users` from every element of the top-level array in `json`, once
/// by index and `iterations` times by stepping.
pub fn long_test(json: &[u8], iterations: u64, max_depth: usize) -> Result<LongReport, ReadError> {
    let evaluator = Evaluator::new(json).with_max_depth(max_depth);
    let root = evaluator.locate("", &[]).check()?;
    if root.kind() != JsonType::Array {
        return Err(ReadError::TypeMismatch);
    }
    let count = root.elements();

    let start = Instant::now();
    let users: Vec<i32> = (0..count)
        .map(|i| int_value(&evaluator.locate(LONG_QUERY, &[i])).unwrap_or_default())
        .collect();
    let indexed = start.elapsed();

    let mut stepped_users = vec![0; count];
    let start = Instant::now();
    for _ in 0..iterations {
        let steps = ArraySteps::new(&root)?.with_max_depth(max_depth);
        for (slot, element) in stepped_users.iter_mut().zip(steps) {
            if element.kind() == JsonType::Object {
                let object = Evaluator::new(element.raw()).with_max_depth(max_depth);
                *slot = int_value(&object.locate("{'Users'", &[])).unwrap_or_default();
            }
        }
    }
    let stepped = start.elapsed();

    let mismatches = if iterations == 0 {
        0
    } else {
        users
            .iter()
            .zip(&stepped_users)
            .filter(|(a, b)| a != b)
            .count()
    };

    Ok(LongReport {
        elements: count,
        indexed,
        iterations,
        stepped,
        users,
        mismatches,
    })
}

pub fn write_long_report<W: Write>(out: &mut W, report: &LongReport) -> io::Result<()> {
    writeln!(out, "JSON is an array of {} elements", report.elements)?;
    writeln!(
        out,
        "{} separate \"{}\" queries took {:.3?}",
        report.elements, LONG_QUERY, report.indexed
    )?;
    let per_element = if report.elements == 0 || report.iterations == 0 {
        Duration::ZERO
    } else {
        report
            .stepped
            .div_f64(report.elements as f64 * report.iterations as f64)
    };
    writeln!(
        out,
        "{} step traversals took {:.3?} (av. {:.2?}/element)",
        report.iterations, report.stepped, per_element
    )?;
    if report.mismatches > 0 {
        writeln!(out, "{} elements differed between the two passes", report.mismatches)?;
    }
    Ok(())
}
