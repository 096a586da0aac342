//! Quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, name search and autocomplete over the `quotes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `order_number` comes from `AUTOINCREMENT` and is never reused.
//! - Writes do not re-validate; callers validate payloads first.
//! - Read paths reject undecodable persisted values instead of masking them.
//! - Listing is ordered by `order_number DESC`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::quote::{
    NewQuote, OrderNumber, PatchValue, Quote, QuoteField, QuotePatch, QuoteSummary,
};
use crate::search::name_filter::{contains_pattern, NameFilter};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum suggestions returned by autocomplete.
pub const AUTOCOMPLETE_LIMIT: u32 = 10;

const QUOTE_SELECT_SQL: &str = "SELECT
    order_number,
    customer_first_name,
    customer_last_name,
    customer_birthdate,
    tax_code,
    item_type,
    item_code,
    description,
    unit,
    quantity,
    unit_price,
    total_price,
    mr_unit_price,
    mr_total_price,
    mr_markup,
    labor_unit_price,
    labor_total_price,
    labor_markup,
    pm_unit_price,
    pm_total_price,
    cm_unit_price,
    cm_total_price
FROM quotes";

const SUMMARY_SELECT_SQL: &str = "SELECT
    order_number,
    item_code,
    customer_first_name,
    customer_last_name
FROM quotes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(OrderNumber),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(order_number) => write!(f, "quote not found: {order_number}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quote data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column missing: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for quote storage.
pub trait QuoteRepository {
    /// Persists a new quote and returns its assigned order number.
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<OrderNumber>;
    /// Loads one quote, or `RepoError::NotFound`.
    fn get_quote(&self, order_number: OrderNumber) -> RepoResult<Quote>;
    /// Lists quote summaries matching `filter`, newest first.
    fn list_quotes(&self, filter: &NameFilter) -> RepoResult<Vec<QuoteSummary>>;
    /// Returns up to [`AUTOCOMPLETE_LIMIT`] distinct "first last" names.
    fn autocomplete_names(&self, term: &str) -> RepoResult<Vec<String>>;
    /// Writes supplied patch fields and returns the affected row count.
    fn update_quote(&self, order_number: OrderNumber, patch: &QuotePatch) -> RepoResult<usize>;
    /// Hard-deletes one quote and returns the affected row count.
    fn delete_quote(&self, order_number: OrderNumber) -> RepoResult<usize>;
}

/// SQLite-backed quote repository.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Rejects connections that were not opened through `crate::db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<OrderNumber> {
        self.conn.execute(
            "INSERT INTO quotes (
                customer_first_name,
                customer_last_name,
                customer_birthdate,
                tax_code,
                item_type,
                item_code,
                description,
                unit,
                quantity,
                unit_price,
                total_price,
                mr_unit_price,
                mr_total_price,
                mr_markup,
                labor_unit_price,
                labor_total_price,
                labor_markup,
                pm_unit_price,
                pm_total_price,
                cm_unit_price,
                cm_total_price
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
            );",
            params![
                quote.customer_first_name.as_str(),
                quote.customer_last_name.as_str(),
                quote.customer_birthdate.as_deref(),
                quote.tax_code.as_str(),
                quote.item_type.as_str(),
                quote.item_code.as_str(),
                quote.description.as_str(),
                quote.unit.as_str(),
                quote.quantity,
                quote.unit_price,
                quote.total_price,
                quote.mr_unit_price,
                quote.mr_total_price,
                quote.mr_markup,
                quote.labor_unit_price,
                quote.labor_total_price,
                quote.labor_markup,
                quote.pm_unit_price,
                quote.pm_total_price,
                quote.cm_unit_price,
                quote.cm_total_price,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_quote(&self, order_number: OrderNumber) -> RepoResult<Quote> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUOTE_SELECT_SQL} WHERE order_number = ?1;"))?;

        let mut rows = stmt.query([order_number])?;
        match rows.next()? {
            Some(row) => parse_quote_row(row),
            None => Err(RepoError::NotFound(order_number)),
        }
    }

    fn list_quotes(&self, filter: &NameFilter) -> RepoResult<Vec<QuoteSummary>> {
        let mut sql = String::from(SUMMARY_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        match filter {
            NameFilter::All => {}
            NameFilter::Single(token) => {
                sql.push_str(
                    r" WHERE customer_first_name LIKE ?1 ESCAPE '\'
                        OR customer_last_name LIKE ?1 ESCAPE '\'",
                );
                bind_values.push(Value::Text(contains_pattern(token)));
            }
            NameFilter::Pair(first, second) => {
                sql.push_str(
                    r" WHERE (customer_first_name LIKE ?1 ESCAPE '\'
                             AND customer_last_name LIKE ?2 ESCAPE '\')
                        OR (customer_first_name LIKE ?2 ESCAPE '\'
                             AND customer_last_name LIKE ?1 ESCAPE '\')",
                );
                bind_values.push(Value::Text(contains_pattern(first)));
                bind_values.push(Value::Text(contains_pattern(second)));
            }
        }

        sql.push_str(" ORDER BY order_number DESC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(QuoteSummary {
                order_number: row.get("order_number")?,
                item_code: read_text(row, "item_code")?,
                customer_first_name: read_text(row, "customer_first_name")?,
                customer_last_name: read_text(row, "customer_last_name")?,
            });
        }

        Ok(summaries)
    }

    fn autocomplete_names(&self, term: &str) -> RepoResult<Vec<String>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            r"SELECT DISTINCT customer_first_name, customer_last_name
              FROM quotes
              WHERE customer_first_name LIKE ?1 ESCAPE '\'
                 OR customer_last_name LIKE ?1 ESCAPE '\'
              ORDER BY customer_last_name ASC, customer_first_name ASC
              LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![contains_pattern(term), AUTOCOMPLETE_LIMIT])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            let first_name = read_text(row, "customer_first_name")?;
            let last_name = read_text(row, "customer_last_name")?;
            names.push(format!("{first_name} {last_name}").trim().to_string());
        }

        Ok(names)
    }

    fn update_quote(&self, order_number: OrderNumber, patch: &QuotePatch) -> RepoResult<usize> {
        let supplied = patch.supplied();
        if supplied.is_empty() {
            return Ok(0);
        }

        let assignments = supplied
            .iter()
            .map(|(field, _)| format!("{} = ?", field.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let mut bind_values = supplied
            .into_iter()
            .map(|(_, value)| match value {
                PatchValue::Text(text) => Value::Text(text),
                PatchValue::Number(number) => Value::Real(number),
            })
            .collect::<Vec<_>>();
        bind_values.push(Value::Integer(order_number));

        let changed = self.conn.execute(
            &format!("UPDATE quotes SET {assignments} WHERE order_number = ?;"),
            params_from_iter(bind_values),
        )?;
        Ok(changed)
    }

    fn delete_quote(&self, order_number: OrderNumber) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM quotes WHERE order_number = ?1;", [order_number])?;
        Ok(changed)
    }
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    use QuoteField as F;

    Ok(Quote {
        order_number: row.get("order_number")?,
        fields: NewQuote {
            customer_first_name: read_text(row, F::CustomerFirstName.as_str())?,
            customer_last_name: read_text(row, F::CustomerLastName.as_str())?,
            customer_birthdate: read_optional_text(row, F::CustomerBirthdate.as_str())?,
            tax_code: read_text(row, F::TaxCode.as_str())?,
            item_type: read_text(row, F::ItemType.as_str())?,
            item_code: read_text(row, F::ItemCode.as_str())?,
            description: read_text(row, F::Description.as_str())?,
            unit: read_text(row, F::Unit.as_str())?,
            quantity: read_number(row, F::Quantity)?,
            unit_price: read_number(row, F::UnitPrice)?,
            total_price: read_number(row, F::TotalPrice)?,
            mr_unit_price: read_number(row, F::MrUnitPrice)?,
            mr_total_price: read_number(row, F::MrTotalPrice)?,
            mr_markup: read_number(row, F::MrMarkup)?,
            labor_unit_price: read_number(row, F::LaborUnitPrice)?,
            labor_total_price: read_number(row, F::LaborTotalPrice)?,
            labor_markup: read_number(row, F::LaborMarkup)?,
            pm_unit_price: read_number(row, F::PmUnitPrice)?,
            pm_total_price: read_number(row, F::PmTotalPrice)?,
            cm_unit_price: read_number(row, F::CmUnitPrice)?,
            cm_total_price: read_number(row, F::CmTotalPrice)?,
        },
    })
}

fn read_text(row: &Row<'_>, column: &str) -> RepoResult<String> {
    row.get::<_, String>(column)
        .map_err(|err| decode_error(err, column))
}

fn read_optional_text(row: &Row<'_>, column: &str) -> RepoResult<Option<String>> {
    row.get::<_, Option<String>>(column)
        .map_err(|err| decode_error(err, column))
}

fn read_number(row: &Row<'_>, field: QuoteField) -> RepoResult<f64> {
    row.get::<_, f64>(field.as_str())
        .map_err(|err| decode_error(err, field.as_str()))
}

fn decode_error(err: rusqlite::Error, column: &str) -> RepoError {
    match err {
        rusqlite::Error::InvalidColumnType(_, _, kind) => {
            RepoError::InvalidData(format!("unexpected {kind} value in quotes.{column}"))
        }
        rusqlite::Error::FromSqlConversionFailure(_, _, cause) => {
            RepoError::InvalidData(format!("undecodable value in quotes.{column}: {cause}"))
        }
        other => other.into(),
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "quotes")? {
        return Err(RepoError::MissingRequiredTable("quotes"));
    }

    let required_columns =
        std::iter::once("order_number").chain(QuoteField::ALL.into_iter().map(QuoteField::as_str));
    for column in required_columns {
        if !table_has_column(conn, "quotes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "quotes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
