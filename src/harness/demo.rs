//! Built-in example queries and their printed results.

use crate::accessor::{copy_string, long_value, read_double, read_int, read_long, read_string};
use crate::document::{Element, ReadError};
use crate::locate;
use crate::query::Evaluator;
use std::io::{self, Write};

/// Document the examples run against.
pub const EXAMPLE_JSON: &str = r#"{
  "astring": "This is a string",
  "number1": 42,
  "number2":  -123.45,
  "anObject":{"one":1,"two":{"obj2.1":21,"obj2.2":22},"three":333},
  "anArray":[0, "one", {"two.0":20,"two.1":21}, 3, [4,44,444]],
  "isnull":null,
  "emptyArray":[],
  "emptyObject":{  },
  "yes": true,
  "no":  false
}
"#;

const EXAMPLE_QUERIES: &[&str] = &[
    "",
    "[1",
    "{'astring'",
    "{'number1'",
    "{'number2'",
    "{'anObject'",
    "{'anArray'",
    "{'isnull'",
    "{'yes'",
    "{'no'",
    "{'missing'",
    "{'anObject'{'two'",
    "{'anObject' {'two' {'obj2.2'",
    "{'anObject'{'three'",
    "{'anArray' [1",
    "{'anArray' [2 {'two.1'",
    "{'anArray' [4 [2",
    "{'anArray' [999",
];

/// Writes a descriptor in the driver's report format.
pub fn write_element<W: Write>(out: &mut W, query: &str, element: &Element<'_>) -> io::Result<()> {
    writeln!(out, "Query: \"{}\"", query)?;
    writeln!(
        out,
        "return: {}= {}",
        element.error().map_or(0, ReadError::code),
        element.error_message()
    )?;
    writeln!(out, " dataType = {}", element.kind())?;
    writeln!(out, " elements = {}", element.elements())?;
    writeln!(out, " bytelen  = {}", element.len())?;
    writeln!(out, " value    = {}", String::from_utf8_lossy(element.raw()))?;
    writeln!(out)
}

/// Runs `query` with `evaluator` and writes the resulting descriptor.
pub fn describe<'a, W: Write>(
    out: &mut W,
    evaluator: &Evaluator<'a>,
    query: &str,
    params: &[usize],
) -> io::Result<Element<'a>> {
    let element = evaluator.locate(query, params);
    write_element(out, query, &element)?;
    Ok(element)
}

/// Runs every built-in example, writing the results to `out`.
pub fn run_examples<W: Write>(out: &mut W, string_capacity: usize) -> io::Result<()> {
    let json = EXAMPLE_JSON.as_bytes();
    let evaluator = Evaluator::new(json);

    for query in EXAMPLE_QUERIES {
        describe(out, &evaluator, query, &[])?;
    }

    writeln!(out, "Empty array or object...")?;
    describe(out, &evaluator, "{'emptyArray'", &[])?;
    describe(out, &evaluator, "{'emptyObject'", &[])?;

    writeln!(out, "Return the key at a given index in an object...")?;
    describe(out, &evaluator, "{3", &[])?;
    describe(out, &evaluator, "{'anObject' {1", &[])?;
    describe(out, &evaluator, "{999", &[])?;

    let number1 = read_long(json, "{'number1'", &[]).unwrap_or_default();
    let yes = read_int(json, "{'yes'", &[]).unwrap_or_default();
    let number2 = read_double(json, "{'number2'", &[]).unwrap_or_default();
    let mut short = [0u8; 16];
    let copied = read_string(json, "{'astring'", &[], &mut short).unwrap_or_default();

    writeln!(out, "Helper Functions...")?;
    writeln!(out, "  \"number1\"= {}", number1)?;
    writeln!(out, "  \"yes\"    = {}", yes)?;
    writeln!(out, "  \"number2\"= {}", number2)?;
    writeln!(
        out,
        "  \"astring\"= \"{}\" ({} of {} bytes)",
        String::from_utf8_lossy(&short[..copied.written]),
        copied.written,
        copied.available
    )?;

    writeln!(out)?;
    writeln!(out, "Queries on sub-elements and use of query parameters...")?;
    let array = locate(json, "{'anArray'", &[]);
    writeln!(out, "  \"anArray\": = {}", String::from_utf8_lossy(array.raw()))?;
    writeln!(out)?;

    let mut text = vec![0u8; string_capacity.max(1)];
    for i in 0..array.elements() {
        let copied = read_string(array.raw(), "[*", &[i], &mut text).unwrap_or_default();
        writeln!(
            out,
            "  anArray[{}] = {}",
            i,
            String::from_utf8_lossy(&text[..copied.written])
        )?;
    }

    let params = [2, 1];
    let copied = read_string(array.raw(), "[*{*", &params, &mut text).unwrap_or_default();
    writeln!(out)?;
    writeln!(
        out,
        "  anArray[{}] objectKey[{}] = \"{}\"",
        params[0],
        params[1],
        String::from_utf8_lossy(&text[..copied.written])
    )?;

    writeln!(out)?;
    writeln!(out, "Names and numbers...")?;
    for person in article_example() {
        writeln!(out, "  {:<8} {}", person.name, person.number)?;
    }
    Ok(())
}

/// Longest name kept by [`article_example`], terminator included.
pub const NAME_LEN: usize = 32;

/// One row read by [`article_example`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub number: i64,
}

/// Reads the `Numbers` list of a small company document into rows.
///
/// `Ident` is a string for two of the three people, so their number reads
/// as the default 0.
pub fn article_example() -> Vec<Person> {
    let json = br#"{
"Company": "The Most Excellent Example Company",
"Address": "Planet Earth",
"Numbers":[
  { "Name":"Fred",   "Ident":12345 },
  { "Name":"Jim",    "Ident":"87654" },
  { "Name":"Zaphod", "Ident":"0777621" }
]
}"#;

    let numbers = locate(json, "{'Numbers'", &[]);
    let mut people = Vec::with_capacity(numbers.elements());
    let mut name = [0u8; NAME_LEN];
    for i in 0..numbers.elements() {
        let name_element = locate(json, "{'Numbers'[*{'Name'", &[i]);
        let copied = copy_string(&name_element, &mut name).unwrap_or_default();
        let number = long_value(&locate(json, "{'Numbers'[*{'Ident'", &[i])).unwrap_or_default();
        people.push(Person {
            name: String::from_utf8_lossy(&name[..copied.written]).into_owned(),
            number,
        });
    }
    people
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_element_format() {
        let evaluator = Evaluator::new(EXAMPLE_JSON.as_bytes());
        let mut out = Vec::new();
        describe(&mut out, &evaluator, "{'number1'", &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                "Query: \"{'number1'\"\n",
                "return: 0= Ok\n",
                " dataType = Number\n",
                " elements = 0\n",
                " bytelen  = 2\n",
                " value    = 42\n\n",
            )
        );
    }

    #[test]
    fn test_write_element_error() {
        let evaluator = Evaluator::new(EXAMPLE_JSON.as_bytes());
        let mut out = Vec::new();
        describe(&mut out, &evaluator, "{'missing'", &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("return: 5= Object key not found"));
    }

    #[test]
    fn test_article_example() {
        let people = article_example();
        assert_eq!(
            people,
            vec![
                Person { name: "Fred".to_string(), number: 12345 },
                Person { name: "Jim".to_string(), number: 0 },
                Person { name: "Zaphod".to_string(), number: 0 },
            ]
        );
    }

    #[test]
    fn test_run_examples_output() {
        let mut out = Vec::new();
        run_examples(&mut out, 128).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  \"number1\"= 42"));
        assert!(text.contains("  \"yes\"    = 1"));
        assert!(text.contains("  \"number2\"= -123.45"));
        assert!(text.contains("\"This is a strin\" (15 of 16 bytes)"));
        assert!(text.contains("  anArray[2] = {\"two.0\":20,\"two.1\":21}"));
        assert!(text.contains("  anArray[2] objectKey[1] = \"two.1\""));
        assert!(text.contains("  Fred     12345"));
    }
}
