//! # REPL — Read-Eval-Print Loop
//!
//! The interactive front end. Reads input with rustyline, buffers lines
//! until a `;` completes a statement, parses it into a `Statement`, and
//! dispatches against the engine's request API with the loop-owned
//! `Session`. Errors are displayed and never terminate the loop; only
//! `EXIT` or end-of-input does.

use std::time::Instant;

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::history::history_path;
use crate::cli::statement::{self, Statement};
use crate::cli::table::TableFormatter;
use crate::database::{Database, QueryResult};
use crate::session::Session;
use crate::VERSION;

const PRIMARY_PROMPT: &str = "wrendb> ";
const CONTINUATION_PROMPT: &str = "    -> ";

pub struct Repl {
    db: Database,
    session: Session,
    editor: DefaultEditor,
    buffer: String,
}

impl Repl {
    pub fn new(db: Database) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        let session = db.session();
        Ok(Self {
            db,
            session,
            editor,
            buffer: String::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = if self.buffer.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(trimmed);

        if self.buffer.trim_end().ends_with(';') {
            let text = std::mem::take(&mut self.buffer);
            self.editor.add_history_entry(&text).ok();
            // A line may carry several ';'-terminated statements.
            for segment in text.split(';') {
                let segment = segment.trim();
                if !segment.is_empty() && !self.execute(segment) {
                    return false;
                }
            }
        }
        true
    }

    /// Executes one complete statement; returns false to leave the loop.
    fn execute(&mut self, text: &str) -> bool {
        let statement = match statement::parse(text) {
            Ok(statement) => statement,
            Err(err) => {
                eprintln!("Error: {}", err);
                return true;
            }
        };

        if statement == Statement::Exit {
            println!("Bye");
            return false;
        }

        let start = Instant::now();
        match self.dispatch(statement) {
            Ok(Some(result)) => self.print_result(&result, start.elapsed()),
            Ok(None) => {}
            Err(err) => eprintln!("Error: {}", err),
        }
        true
    }

    fn dispatch(&mut self, statement: Statement) -> crate::Result<Option<QueryResult>> {
        match statement {
            Statement::Help => {
                println!("{}", help_text());
                Ok(None)
            }
            Statement::Exit => Ok(None),
            Statement::ShowSchemas => self.db.list_schemas().map(Some),
            Statement::ShowTables => self.db.list_tables(&self.session).map(Some),
            Statement::UseSchema(name) => {
                self.db.use_schema(&mut self.session, &name)?;
                println!("Schema '{}' is now active.", self.session.active_schema());
                Ok(None)
            }
            Statement::CreateSchema(name) => {
                self.db.create_schema(&name)?;
                println!("Schema '{}' created.", name);
                Ok(None)
            }
            Statement::CreateTable { name, columns } => {
                self.db.create_table(&self.session, &name, &columns)?;
                println!("Table '{}' created.", name);
                Ok(None)
            }
            Statement::Insert { table, values } => {
                self.db.insert_row(&self.session, &table, &values)?;
                println!("1 row inserted.");
                Ok(None)
            }
            Statement::SelectAll { table } => self.db.select_all(&self.session, &table).map(Some),
            Statement::SelectWhere {
                table,
                column,
                operator,
                literal,
            } => self
                .db
                .select_where(&self.session, &table, &column, &operator, &literal)
                .map(Some),
        }
    }

    fn print_result(&self, result: &QueryResult, elapsed: std::time::Duration) {
        let formatter = TableFormatter::new(result);
        print!("{}", formatter.render());
        println!(
            "{} row{} in set ({:.3} sec)",
            formatter.row_count(),
            if formatter.row_count() == 1 { "" } else { "s" },
            elapsed.as_secs_f64()
        );
    }

    fn print_welcome(&self) {
        println!("WrenDB v{}", VERSION);
        println!("Type \"help;\" to list supported commands.");
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            let _ = self.editor.save_history(&history_file);
        }
    }
}

fn help_text() -> String {
    r#"Supported commands:

  SHOW SCHEMAS;                          List all schemas.
  USE <schema>;                          Switch the active schema.
  SHOW TABLES;                           List tables of the active schema.
  CREATE SCHEMA <name>;                  Create a new schema.
  CREATE TABLE <name> (<column defs>);   Create a table in the active schema.
  INSERT INTO <table> VALUES (...);      Append one row.
  SELECT * FROM <table>;                 Read every row.
  SELECT * FROM <table> WHERE <pred>;    Filter on one indexed column.
  HELP;                                  Show this help.
  EXIT;                                  Leave the shell.

Column defs: <name> <type> [NOT NULL] [PRIMARY KEY]
Types: BYTE, SHORT INT, INT, LONG INT, FLOAT, DOUBLE, DATETIME, DATE,
       CHAR(n), VARCHAR(n)
Dates: 'yyyy-MM-dd', datetimes: 'yyyy-MM-dd_HH:mm:ss'"#
        .to_string()
}
