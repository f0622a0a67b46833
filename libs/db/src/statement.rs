use chrono::{DateTime, Utc};

/// Positional query argument. Covers the column types the store works with.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Text(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(v: DateTime<Utc>) -> Self {
        Arg::Timestamp(v)
    }
}

/// A SQL template with `$1..$n` placeholders and its ordered arguments.
///
/// The same template runs on PostgreSQL and SQLite; both accept numbered
/// `$N` parameters.
#[derive(Clone, Debug)]
pub struct Statement<'q> {
    sql: &'q str,
    args: Vec<Arg>,
}

impl<'q> Statement<'q> {
    pub fn new(sql: &'q str) -> Self {
        Self {
            sql,
            args: Vec::new(),
        }
    }

    pub fn bind(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn sql(&self) -> &'q str {
        self.sql
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (&'q str, Vec<Arg>) {
        (self.sql, self.args)
    }
}
