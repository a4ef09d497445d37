//! [`SqliteStore`] — the SQLite implementation of [`QuoteStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use fdm_core::{
  favorite::Favorite,
  quote::{Author, Category, Quote, QuoteRecord},
  store::{QuoteFilter, QuoteStore},
  user::User,
};

use crate::{
  encode::{encode_dt, encode_uuid, RawFavorite, RawQuoteRecord, RawUser},
  schema::SCHEMA,
  Error, Result,
};

const USER_COLUMNS: &str = "user_id, external_id, email, created_at";

const QUOTE_JOIN: &str = "
  SELECT q.quote_id, q.text, a.name, c.name
  FROM quotes q
  LEFT JOIN authors    a ON a.author_id   = q.author_id
  LEFT JOIN categories c ON c.category_id = q.category_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A quote store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run sequentially on the connection's worker thread, so every
/// check-then-act sequence below (identity resolution, toggle) executes
/// atomically with respect to concurrent callers.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reference-data seeding ────────────────────────────────────────────────
  //
  // Authors, categories, and quotes are provisioned out-of-band; these
  // inherent methods exist for seed scripts and tests and are deliberately
  // not part of the `QuoteStore` trait, which reads reference data only.

  pub async fn add_author(&self, name: &str) -> Result<Author> {
    let author = Author { author_id: Uuid::new_v4(), name: name.to_owned() };

    let id_str = encode_uuid(author.author_id);
    let name = author.name.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO authors (author_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(author)
  }

  pub async fn add_category(&self, name: &str) -> Result<Category> {
    let category =
      Category { category_id: Uuid::new_v4(), name: name.to_owned() };

    let id_str = encode_uuid(category.category_id);
    let name = category.name.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(category)
  }

  pub async fn add_quote(
    &self,
    text: &str,
    author_id: Uuid,
    category_id: Option<Uuid>,
  ) -> Result<Quote> {
    let quote = Quote {
      quote_id: Uuid::new_v4(),
      text: text.to_owned(),
      author_id,
      category_id,
    };

    let id_str = encode_uuid(quote.quote_id);
    let text = quote.text.clone();
    let author_str = encode_uuid(author_id);
    let category_str = category_id.map(encode_uuid);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO quotes (quote_id, text, author_id, category_id)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, text, author_str, category_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(quote)
  }

  /// Run the quote/author/category join with `where_clause` appended, where
  /// `params` are bound positionally after the clause's own placeholders.
  async fn query_quote_join(
    &self,
    where_clause: String,
    params: Vec<String>,
  ) -> Result<Vec<QuoteRecord>> {
    let raws: Vec<RawQuoteRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!("{QUOTE_JOIN} {where_clause}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawQuoteRecord {
              quote_id: row.get(0)?,
              text:     row.get(1)?,
              author:   row.get(2)?,
              category: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuoteRecord::into_record).collect()
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Test-only escape hatch for simulating out-of-band reference-data
  /// drift (e.g. an author row deleted by an external script).
  pub(crate) async fn raw_execute_batch(&self, sql: &str) {
    let sql = sql.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await
      .expect("raw batch");
  }
}

/// Build the filter conditions and their bind values for `filter`.
fn filter_conditions(filter: &QuoteFilter) -> (Vec<&'static str>, Vec<String>) {
  let mut conds = Vec::new();
  let mut params = Vec::new();
  if let Some(author) = &filter.author {
    conds.push("a.name = ?");
    params.push(author.clone());
  }
  if let Some(category) = &filter.category {
    conds.push("c.name = ?");
    params.push(category.clone());
  }
  (conds, params)
}

// ─── QuoteStore impl ─────────────────────────────────────────────────────────

impl QuoteStore for SqliteStore {
  type Error = Error;

  // ── Identity ──────────────────────────────────────────────────────────────

  async fn resolve_user(
    &self,
    external_id: &str,
    email: Option<&str>,
  ) -> Result<User> {
    let external_id = external_id.to_owned();
    let email = email.map(str::to_owned);
    let new_id_str = encode_uuid(Uuid::new_v4());
    let now_str = encode_dt(Utc::now());

    let raw: RawUser = self
      .conn
      .call(move |conn| {
        let by_external = |conn: &rusqlite::Connection, ext: &str| {
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE external_id = ?1"),
              rusqlite::params![ext],
              |row| {
                Ok(RawUser {
                  user_id:     row.get(0)?,
                  external_id: row.get(1)?,
                  email:       row.get(2)?,
                  created_at:  row.get(3)?,
                })
              },
            )
            .optional()
        };

        if let Some(raw) = by_external(conn, &external_id)? {
          return Ok(raw);
        }

        // Secondary lookup by email: the provider may have re-issued the
        // subject id for an existing account. Adopt the new id in place.
        if let Some(email) = &email {
          let by_email: Option<String> = conn
            .query_row(
              "SELECT user_id FROM users WHERE email = ?1",
              rusqlite::params![email],
              |row| row.get(0),
            )
            .optional()?;

          if let Some(user_id) = by_email {
            conn.execute(
              "UPDATE users SET external_id = ?1 WHERE user_id = ?2",
              rusqlite::params![external_id, user_id],
            )?;
            if let Some(raw) = by_external(conn, &external_id)? {
              return Ok(raw);
            }
          }
        }

        conn.execute(
          "INSERT INTO users (user_id, external_id, email, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![new_id_str, external_id, email, now_str],
        )?;

        Ok(RawUser {
          user_id:     new_id_str,
          external_id,
          email,
          created_at:  now_str,
        })
      })
      .await?;

    raw.into_user()
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>> {
    let user_id_str = encode_uuid(user_id);

    let raws: Vec<RawFavorite> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT quote_id, created_at FROM favorites WHERE user_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id_str], |row| {
            Ok(RawFavorite {
              quote_id:   row.get(0)?,
              created_at: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFavorite::into_favorite).collect()
  }

  async fn toggle_favorite(
    &self,
    user_id: Uuid,
    quote_id: Uuid,
  ) -> Result<Option<bool>> {
    let user_id_str = encode_uuid(user_id);
    let quote_id_str = encode_uuid(quote_id);
    let favorite_id_str = encode_uuid(Uuid::new_v4());
    let now_str = encode_dt(Utc::now());

    let state: Option<bool> = self
      .conn
      .call(move |conn| {
        let quote_exists: bool = conn
          .query_row(
            "SELECT 1 FROM quotes WHERE quote_id = ?1",
            rusqlite::params![quote_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !quote_exists {
          return Ok(None);
        }

        // Delete-first toggle: a successful delete means the pair was
        // favorited and now is not. Otherwise insert; OR IGNORE makes a
        // concurrent duplicate insert land as "already liked" instead of
        // surfacing the uniqueness violation.
        let deleted = conn.execute(
          "DELETE FROM favorites WHERE user_id = ?1 AND quote_id = ?2",
          rusqlite::params![user_id_str, quote_id_str],
        )?;
        if deleted > 0 {
          return Ok(Some(false));
        }

        conn.execute(
          "INSERT OR IGNORE INTO favorites (favorite_id, user_id, quote_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![favorite_id_str, user_id_str, quote_id_str, now_str],
        )?;
        Ok(Some(true))
      })
      .await?;

    Ok(state)
  }

  async fn like_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, u64>> {
    if ids.is_empty() {
      return Ok(HashMap::new());
    }

    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();
    let placeholders = vec!["?"; id_strs.len()].join(", ");

    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT quote_id, COUNT(*) FROM favorites
           WHERE quote_id IN ({placeholders})
           GROUP BY quote_id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs), |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(id, count)| Ok((crate::encode::decode_uuid(&id)?, count as u64)))
      .collect()
  }

  // ── Quotes ────────────────────────────────────────────────────────────────

  async fn quotes_by_ids(
    &self,
    ids: &[Uuid],
    filter: &QuoteFilter,
  ) -> Result<Vec<QuoteRecord>> {
    // Degenerate case: no favorites means no query at all, never a
    // "fetch everything" scan.
    if ids.is_empty() {
      return Ok(vec![]);
    }

    let mut params: Vec<String> =
      ids.iter().copied().map(encode_uuid).collect();
    let placeholders = vec!["?"; params.len()].join(", ");

    let mut conds = vec![format!("q.quote_id IN ({placeholders})")];
    let (filter_conds, filter_params) = filter_conditions(filter);
    conds.extend(filter_conds.into_iter().map(str::to_owned));
    params.extend(filter_params);

    let where_clause = format!("WHERE {}", conds.join(" AND "));
    self.query_quote_join(where_clause, params).await
  }

  async fn random_quotes(
    &self,
    limit: usize,
    filter: &QuoteFilter,
  ) -> Result<Vec<QuoteRecord>> {
    let (conds, params) = filter_conditions(filter);
    let where_clause = if filter.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let clause =
      format!("{where_clause} ORDER BY RANDOM() LIMIT {}", limit as i64);
    self.query_quote_join(clause, params).await
  }
}
