//! # Statement Parser
//!
//! Turns one `;`-terminated command into a typed `Statement`. This is the
//! front-end half of the collaborator contract: all text tokenizing,
//! quote stripping, and predicate splitting happens here, so the engine
//! only ever receives already-tokenized arguments and performs nothing
//! but per-value type conversion.
//!
//! ## Supported Commands
//!
//! | Command | Statement |
//! |---------|-----------|
//! | `SHOW SCHEMAS` | `ShowSchemas` |
//! | `SHOW TABLES` | `ShowTables` |
//! | `USE <schema>` | `UseSchema` |
//! | `CREATE SCHEMA <name>` | `CreateSchema` |
//! | `CREATE TABLE <name> (col type [NOT NULL] [PRIMARY KEY], ...)` | `CreateTable` |
//! | `INSERT INTO <table> VALUES (v, ...)` | `Insert` |
//! | `SELECT * FROM <table>` | `SelectAll` |
//! | `SELECT * FROM <table> WHERE <col> <op> <value>` | `SelectWhere` |
//! | `HELP` / `EXIT` | `Help` / `Exit` |
//!
//! Keywords are case-insensitive. Anything else is `SyntaxRejected`.

use crate::database::ColumnSpec;
use crate::error::{Error, Result};

/// One parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Help,
    Exit,
    ShowSchemas,
    ShowTables,
    UseSchema(String),
    CreateSchema(String),
    CreateTable {
        name: String,
        columns: Vec<ColumnSpec>,
    },
    Insert {
        table: String,
        values: Vec<String>,
    },
    SelectAll {
        table: String,
    },
    SelectWhere {
        table: String,
        column: String,
        operator: String,
        literal: String,
    },
}

/// Parses one statement (without its trailing `;`).
pub fn parse(input: &str) -> Result<Statement> {
    let input = input.trim().trim_end_matches(';').trim();
    if input.is_empty() {
        return Err(Error::SyntaxRejected("empty statement".to_string()));
    }

    let tokens: Vec<&str> = input.split_whitespace().collect();
    let keyword = tokens[0].to_ascii_lowercase();

    match keyword.as_str() {
        "help" if tokens.len() == 1 => Ok(Statement::Help),
        "exit" if tokens.len() == 1 => Ok(Statement::Exit),
        "show" => parse_show(&tokens),
        "use" => parse_use(&tokens),
        "create" => parse_create(input, &tokens),
        "insert" => parse_insert(input, &tokens),
        "select" => parse_select(input, &tokens),
        _ => Err(syntax(input)),
    }
}

fn parse_show(tokens: &[&str]) -> Result<Statement> {
    match tokens {
        [_, what] if what.eq_ignore_ascii_case("schemas") => Ok(Statement::ShowSchemas),
        [_, what] if what.eq_ignore_ascii_case("tables") => Ok(Statement::ShowTables),
        _ => Err(Error::SyntaxRejected(
            "expected SHOW SCHEMAS or SHOW TABLES".to_string(),
        )),
    }
}

fn parse_use(tokens: &[&str]) -> Result<Statement> {
    match tokens {
        [_, schema] => Ok(Statement::UseSchema((*schema).to_string())),
        _ => Err(Error::SyntaxRejected("expected USE <schema>".to_string())),
    }
}

fn parse_create(input: &str, tokens: &[&str]) -> Result<Statement> {
    if tokens.len() >= 3 && tokens[1].eq_ignore_ascii_case("schema") {
        if tokens.len() != 3 {
            return Err(Error::SyntaxRejected(
                "expected CREATE SCHEMA <name>".to_string(),
            ));
        }
        return Ok(Statement::CreateSchema(tokens[2].to_string()));
    }

    if tokens.len() >= 3 && tokens[1].eq_ignore_ascii_case("table") {
        // The table name is the token between TABLE and the first '(',
        // which may be glued to the name.
        let paren = input.find('(').ok_or_else(|| {
            Error::SyntaxRejected("expected a parenthesized column list".to_string())
        })?;
        let head: Vec<&str> = input[..paren].split_whitespace().collect();
        if head.len() != 3 {
            return Err(syntax(input));
        }
        let name = head[2].to_string();
        let body = parenthesized(&input[paren..])?;

        let mut columns = Vec::new();
        for item in body.split(',') {
            columns.push(parse_column_spec(item)?);
        }
        return Ok(Statement::CreateTable { name, columns });
    }

    Err(syntax(input))
}

fn parse_column_spec(item: &str) -> Result<ColumnSpec> {
    let tokens: Vec<&str> = item.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::SyntaxRejected(format!(
            "incomplete column definition '{}'",
            item.trim()
        )));
    }

    let name = tokens[0].to_string();

    // Two-word types: SHORT INT and LONG INT.
    let mut consumed = 2;
    let first = tokens[1].to_ascii_lowercase();
    let type_text = if (first == "short" || first == "long")
        && tokens.get(2).is_some_and(|t| t.eq_ignore_ascii_case("int"))
    {
        consumed = 3;
        format!("{} int", first)
    } else {
        tokens[1].to_string()
    };

    let mut spec = ColumnSpec::new(name, type_text);
    let mut rest = &tokens[consumed..];
    while !rest.is_empty() {
        match rest {
            [not, null, tail @ ..]
                if not.eq_ignore_ascii_case("not") && null.eq_ignore_ascii_case("null") =>
            {
                spec = spec.not_null();
                rest = tail;
            }
            [primary, key, tail @ ..]
                if primary.eq_ignore_ascii_case("primary")
                    && key.eq_ignore_ascii_case("key") =>
            {
                spec = spec.primary_key();
                rest = tail;
            }
            _ => {
                return Err(Error::SyntaxRejected(format!(
                    "unexpected column modifier '{}'",
                    rest.join(" ")
                )))
            }
        }
    }
    Ok(spec)
}

fn parse_insert(input: &str, tokens: &[&str]) -> Result<Statement> {
    if tokens.len() < 4
        || !tokens[1].eq_ignore_ascii_case("into")
        || !tokens[3].to_ascii_lowercase().starts_with("values")
    {
        return Err(Error::SyntaxRejected(
            "expected INSERT INTO <table> VALUES (...)".to_string(),
        ));
    }

    let table = tokens[2].to_string();
    let paren = input.find('(').ok_or_else(|| {
        Error::SyntaxRejected("expected a parenthesized value list".to_string())
    })?;
    let body = parenthesized(&input[paren..])?;

    let values = body
        .split(',')
        .map(|v| strip_quotes(v.trim()).to_string())
        .collect();
    Ok(Statement::Insert { table, values })
}

fn parse_select(input: &str, tokens: &[&str]) -> Result<Statement> {
    if tokens.len() < 4
        || tokens[1] != "*"
        || !tokens[2].eq_ignore_ascii_case("from")
    {
        return Err(Error::SyntaxRejected(
            "expected SELECT * FROM <table> [WHERE ...]".to_string(),
        ));
    }

    let table = tokens[3].to_string();
    if tokens.len() == 4 {
        return Ok(Statement::SelectAll { table });
    }

    if !tokens[4].eq_ignore_ascii_case("where") {
        return Err(syntax(input));
    }
    let condition = tokens[5..].join(" ");
    let (column, operator, literal) = split_predicate(&condition)?;

    Ok(Statement::SelectWhere {
        table,
        column,
        operator,
        literal,
    })
}

/// Splits `col <op> value` on the first operator occurrence, longest
/// operators first so `<=` never parses as `<` followed by `=`.
fn split_predicate(condition: &str) -> Result<(String, String, String)> {
    for op in ["<=", ">=", "<>", "=", "<", ">"] {
        if let Some(pos) = condition.find(op) {
            let column = condition[..pos].trim();
            let literal = strip_quotes(condition[pos + op.len()..].trim());
            if column.is_empty() || literal.is_empty() {
                return Err(Error::SyntaxRejected(format!(
                    "incomplete predicate '{}'",
                    condition
                )));
            }
            return Ok((column.to_string(), op.to_string(), literal.to_string()));
        }
    }
    Err(Error::SyntaxRejected(format!(
        "no comparison operator in '{}'",
        condition
    )))
}

/// The text inside a balanced outer parenthesis pair.
fn parenthesized(text: &str) -> Result<&str> {
    let text = text.trim();
    let inner = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| {
            Error::SyntaxRejected(format!("unbalanced parentheses in '{}'", text))
        })?;
    Ok(inner.trim())
}

/// Removes one pair of surrounding single quotes, if present.
fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
}

fn syntax(input: &str) -> Error {
    Error::SyntaxRejected(format!("unrecognized statement '{}'", input))
}
