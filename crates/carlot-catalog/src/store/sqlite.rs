//! SQLite implementation of [`CatalogStore`].
//!
//! Uses [`sqlx`] with the `sqlite` feature. Migrations are embedded at
//! compile time (`sqlx::migrate!("./migrations")`, relative to the crate
//! root) and run on [`SqliteCatalog::connect`].
//!
//! Predicates are translated into a `WHERE` clause with [`QueryBuilder`];
//! every value is a bound parameter and column names come only from
//! [`Field::column`], so request data is never spliced into SQL.
//! SQLite's `lower()` only folds ASCII, so [`Predicate::Contains`] is not
//! pushed down: it widens to `1 = 1` in SQL and the scanned rows are
//! narrowed with [`Predicate::matches`] before the limit is applied.
//!
//! Text search goes through the `cars_fts` FTS5 table (`unicode61`, no
//! stemming, diacritics kept). Query words are quoted individually and
//! OR-ed, and hits are ordered by FTS5 `rank` (bm25).

use std::str::FromStr;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::{text_terms, CatalogStore};
use crate::entry::CatalogEntry;
use crate::error::StoreError;
use crate::predicate::{Predicate, Value};

const COLUMNS: &str = "id, price, color, fuel_type, car_type, tier_type, model, seats, brand, \
                       made, engine_model, airbags, mileage, image";

/// SQLite-backed catalog.
#[derive(Clone, Debug)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open (or create) the database at `url` and run pending migrations.
    ///
    /// `url` is a sqlx SQLite URL such as `"sqlite://carlot.db"`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::migrated(pool).await
    }

    /// Private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a row and return its id. The entry's own `id` is ignored.
    pub async fn insert(&self, entry: &CatalogEntry) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO cars (price, color, fuel_type, car_type, tier_type, model, seats, brand, \
             made, engine_model, airbags, mileage, image) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(entry.price)
        .bind(&entry.color)
        .bind(&entry.fuel_type)
        .bind(&entry.body_type)
        .bind(&entry.trim_level)
        .bind(&entry.model)
        .bind(entry.seat_count)
        .bind(&entry.brand)
        .bind(&entry.country_of_origin)
        .bind(&entry.transmission)
        .bind(entry.airbag_count)
        .bind(&entry.mileage)
        .bind(&entry.image_reference)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }
}

#[derive(Debug, FromRow)]
struct CarRow {
    id: i64,
    price: i64,
    color: String,
    fuel_type: String,
    car_type: String,
    tier_type: String,
    model: String,
    seats: i64,
    brand: String,
    made: String,
    engine_model: String,
    airbags: i64,
    mileage: String,
    image: String,
}

impl From<CarRow> for CatalogEntry {
    fn from(row: CarRow) -> Self {
        CatalogEntry {
            id: row.id,
            price: row.price,
            color: row.color,
            fuel_type: row.fuel_type,
            body_type: row.car_type,
            trim_level: row.tier_type,
            model: row.model,
            seat_count: row.seats,
            brand: row.brand,
            country_of_origin: row.made,
            transmission: row.engine_model,
            airbag_count: row.airbags,
            mileage: row.mileage,
            image_reference: row.image,
        }
    }
}

fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::All => {
            qb.push("1 = 1");
        }
        Predicate::Never | Predicate::Unmapped { .. } => {
            qb.push("1 = 0");
        }
        Predicate::Eq { field, value } => match value {
            Value::Int(n) if field.is_integer() => {
                qb.push(field.column()).push(" = ").push_bind(*n);
            }
            Value::Text(s) if !field.is_integer() => {
                qb.push(field.column()).push(" = ").push_bind(s.clone());
            }
            // SQLite would coerce across affinities; a mistyped literal
            // matches nothing, as in the in-memory store.
            _ => {
                qb.push("1 = 0");
            }
        },
        Predicate::Range { field, min, max } => {
            qb.push("(").push(field.column()).push(" >= ").push_bind(*min);
            if let Some(max) = max {
                qb.push(" AND ").push(field.column()).push(" <= ").push_bind(*max);
            }
            qb.push(")");
        }
        // Evaluated in Rust; see `find`.
        Predicate::Contains { .. } => {
            qb.push("1 = 1");
        }
        Predicate::And(parts) => push_joined(qb, parts, " AND ", "1 = 1"),
        Predicate::Or(parts) => push_joined(qb, parts, " OR ", "1 = 0"),
    }
}

/// Whether the SQL translation of `predicate` is exact, i.e. it has no
/// [`Predicate::Contains`] that was widened to `1 = 1`.
fn is_exact_in_sql(predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Contains { .. } => false,
        Predicate::And(parts) | Predicate::Or(parts) => parts.iter().all(is_exact_in_sql),
        _ => true,
    }
}

fn push_joined(qb: &mut QueryBuilder<'_, Sqlite>, parts: &[Predicate], joiner: &str, empty: &str) {
    if parts.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            qb.push(joiner);
        }
        push_predicate(qb, part);
    }
    qb.push(")");
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find(
        &self,
        predicate: &Predicate,
        limit: Option<usize>,
    ) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM cars WHERE "));
        push_predicate(&mut qb, predicate);
        qb.push(" ORDER BY id");

        if is_exact_in_sql(predicate) {
            if let Some(limit) = limit {
                qb.push(" LIMIT ").push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
            }
            debug!(sql = qb.sql(), "sqlite find");
            let rows: Vec<CarRow> = qb.build_query_as().fetch_all(&self.pool).await?;
            return Ok(rows.into_iter().map(CatalogEntry::from).collect());
        }

        debug!(sql = qb.sql(), "sqlite find, narrowing rows in process");
        let limit = limit.unwrap_or(usize::MAX);
        let mut hits = Vec::new();
        let mut rows = qb.build_query_as::<CarRow>().fetch(&self.pool);
        while hits.len() < limit {
            let Some(row) = rows.try_next().await? else {
                break;
            };
            let entry = CatalogEntry::from(row);
            if predicate.matches(&entry) {
                hits.push(entry);
            }
        }
        Ok(hits)
    }

    async fn search_text(&self, query: &str) -> Result<Vec<CatalogEntry>, StoreError> {
        let terms = text_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let fts_query = terms
            .iter()
            .map(|term| format!("\"{term}\""))
            .collect::<Vec<_>>()
            .join(" OR ");
        debug!(fts_query = %fts_query, "sqlite text search");

        let rows: Vec<CarRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM cars \
             JOIN (SELECT rowid AS hit, rank FROM cars_fts WHERE cars_fts MATCH ?1) AS hits \
             ON cars.id = hits.hit \
             ORDER BY hits.rank, cars.id"
        ))
        .bind(fts_query)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(n).unwrap_or_default())
    }
}
