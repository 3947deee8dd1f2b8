use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod budgets;
mod expenses;
mod reports;
mod users;

/// Runs `$body` with `$tx` bound to a fresh transaction. The transaction is
/// committed when the body yields `Ok`; an early `?` return drops it, which
/// rolls it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every account, ledger, budget and report operation.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Starts building an engine over an already connected database.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Fails if the database does not answer a ping.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
        })
    }
}
