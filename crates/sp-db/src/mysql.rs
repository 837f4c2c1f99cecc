//! MySQL database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use sp_core::config::SchemaConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Executor};
use tokio::sync::Mutex;

/// MySQL backend over a single connection.
///
/// Statements run over the text protocol (`sqlx::raw_sql`) so DDL does not
/// go through prepare. The connection is released explicitly with
/// [`Database::close`]; every call after that fails with a connection
/// error.
pub struct MySqlBackend {
    conn: Mutex<Option<MySqlConnection>>,
}

impl MySqlBackend {
    /// Connect using resolved schema parameters.
    pub async fn connect(config: &SchemaConfig) -> DbResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.dbname)
            .charset(&config.charset.to_lowercase())
            .username(&config.user)
            .password(&config.pass);

        let conn = options
            .connect()
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Human-readable connection target, for the startup banner.
    pub fn describe(config: &SchemaConfig) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            config.user, config.host, config.port, config.dbname
        )
    }

}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute(&self, sql: &str) -> DbResult<i64> {
        // rows_affected is 0 for read-style statements on this driver, so
        // the negative "not meaningful" sentinel never occurs here.
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("connection closed".to_string()))?;

        let result = conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(result.rows_affected() as i64)
    }

    async fn warning_count(&self) -> DbResult<u64> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("connection closed".to_string()))?;

        let count: u64 = sqlx::query_scalar("SELECT @@warning_count")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count)
    }

    async fn begin(&self) -> DbResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("connection closed".to_string()))?;

        let sql = "START TRANSACTION";
        conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::TransactionError(format!("{e}: {sql}")))?;
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("connection closed".to_string()))?;

        let sql = "COMMIT";
        conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::TransactionError(format!("{e}: {sql}")))?;
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("connection closed".to_string()))?;

        let sql = "ROLLBACK";
        conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::TransactionError(format!("{e}: {sql}")))?;
        Ok(())
    }

    async fn close(&self) -> DbResult<()> {
        let conn = self.conn.lock().await.take();
        match conn {
            Some(conn) => conn
                .close()
                .await
                .map_err(|e| DbError::ConnectionError(e.to_string())),
            None => Ok(()),
        }
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SchemaConfig {
        SchemaConfig {
            host: "db.internal".to_string(),
            port: 3307,
            dbname: "myapp".to_string(),
            charset: "UTF8MB4".to_string(),
            user: "installer".to_string(),
            pass: "secret".to_string(),
        }
    }

    #[test]
    fn test_describe_omits_password() {
        let described = MySqlBackend::describe(&schema());
        assert_eq!(described, "mysql://installer@db.internal:3307/myapp");
        assert!(!described.contains("secret"));
    }
}
