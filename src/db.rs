//! Database connection seam
//!
//! The pipeline itself never talks to a database; workers do, through an
//! external driver. This module carries only the contract the rest of the
//! code consumes: connection parameters, the keyword/value conninfo string
//! they format to, and a connector trait a driver adapter implements.
//! Connection failure is a hard error to the caller; there is no retry
//! policy.

use crate::core::error::Result;

/// Parameters for one database connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub dbname: String,
    pub user: String,
    /// Tag shown in the server's activity views, e.g. `funnel-worker-3`
    pub application_name: String,
}

impl ConnectParams {
    pub fn new(
        dbname: impl Into<String>,
        user: impl Into<String>,
        application_name: impl Into<String>,
    ) -> Self {
        Self {
            dbname: dbname.into(),
            user: user.into(),
            application_name: application_name.into(),
        }
    }

    /// Keyword/value connection string
    ///
    /// The password mirrors the user name; deployments are expected to rely
    /// on peer or service-file authentication rather than this field.
    #[must_use]
    pub fn conninfo(&self) -> String {
        format!(
            "dbname={} user={} password={} application_name={}",
            self.dbname, self.user, self.user, self.application_name
        )
    }
}

/// Adapter contract for an external database driver
///
/// Implementations wrap a concrete client library and map its failures to
/// [`FunnelError::ConnectionError`](crate::core::FunnelError).
pub trait Connector {
    type Handle;

    fn connect(&self, params: &ConnectParams) -> Result<Self::Handle>;
}
