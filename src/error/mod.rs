//! Error types for the Mochow client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, MochowError>;

/// Main error type for the Mochow client
///
/// Service-level failures (a non-zero `code` in the response body) are not
/// errors: they come back inside the typed response so callers can branch on
/// the code. See [`ServerErrCode`].
#[derive(Error, Debug)]
pub enum MochowError {
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while building a search request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Batch search requires at least one vector")]
    EmptyBatch,

    #[error("Hybrid search does not accept a batch vector request")]
    BatchVectorInHybrid,

    #[error("Invalid distance range: near={near}, far={far}")]
    InvalidDistanceRange { near: f64, far: f64 },

    #[error("Invalid vector component {value} at position {position}")]
    InvalidVector { position: usize, value: f32 },

    #[error("Invalid hybrid weights: vector={vector}, bm25={bm25}")]
    InvalidWeight { vector: f64, bm25: f64 },
}

/// Errors raised by the HTTP transport
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Unexpected response with status {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
}

/// Error codes reported by the service in the `code` field of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrCode {
    Ok = 0,
    InternalError = 1,
    InvalidParameter = 2,
    InvalidHttpUrl = 10,
    InvalidHttpHeader = 11,
    InvalidHttpBody = 12,
    MissSslCertificates = 13,
    UserNotExist = 20,
    UserAlreadyExist = 21,
    RoleNotExist = 22,
    RoleAlreadyExist = 23,
    AuthenticationFailed = 24,
    PermissionDenied = 25,
    DbNotExist = 50,
    DbAlreadyExist = 51,
    DbTooManyTables = 52,
    DbNotEmpty = 53,
    InvalidTableSchema = 60,
    InvalidPartitionParameters = 61,
    TableTooManyFields = 62,
    TableTooManyFamilies = 63,
    TableTooManyPrimaryKeys = 64,
    TableTooManyPartitionKeys = 65,
    TableTooManyVectorFields = 66,
    TableTooManyIndexes = 67,
    DynamicSchemaError = 68,
    TableNotExist = 69,
    TableAlreadyExist = 70,
    InvalidTableState = 71,
    TableNotReady = 72,
    AliasNotExist = 73,
    AliasAlreadyExist = 74,
    FieldNotExist = 80,
    FieldAlreadyExist = 81,
    VectorFieldNotExist = 82,
    InvalidIndexSchema = 90,
    IndexNotExist = 91,
    IndexAlreadyExist = 92,
    IndexDuplicated = 93,
    InvalidIndexState = 94,
    PrimaryKeyDuplicated = 100,
}

impl ServerErrCode {
    /// Map a raw response code to a known error code
    pub fn from_code(code: i32) -> Option<Self> {
        use ServerErrCode::*;

        let known = match code {
            0 => Ok,
            1 => InternalError,
            2 => InvalidParameter,
            10 => InvalidHttpUrl,
            11 => InvalidHttpHeader,
            12 => InvalidHttpBody,
            13 => MissSslCertificates,
            20 => UserNotExist,
            21 => UserAlreadyExist,
            22 => RoleNotExist,
            23 => RoleAlreadyExist,
            24 => AuthenticationFailed,
            25 => PermissionDenied,
            50 => DbNotExist,
            51 => DbAlreadyExist,
            52 => DbTooManyTables,
            53 => DbNotEmpty,
            60 => InvalidTableSchema,
            61 => InvalidPartitionParameters,
            62 => TableTooManyFields,
            63 => TableTooManyFamilies,
            64 => TableTooManyPrimaryKeys,
            65 => TableTooManyPartitionKeys,
            66 => TableTooManyVectorFields,
            67 => TableTooManyIndexes,
            68 => DynamicSchemaError,
            69 => TableNotExist,
            70 => TableAlreadyExist,
            71 => InvalidTableState,
            72 => TableNotReady,
            73 => AliasNotExist,
            74 => AliasAlreadyExist,
            80 => FieldNotExist,
            81 => FieldAlreadyExist,
            82 => VectorFieldNotExist,
            90 => InvalidIndexSchema,
            91 => IndexNotExist,
            92 => IndexAlreadyExist,
            93 => IndexDuplicated,
            94 => InvalidIndexState,
            100 => PrimaryKeyDuplicated,
            _ => return None,
        };
        Some(known)
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<config::ConfigError> for MochowError {
    fn from(err: config::ConfigError) -> Self {
        MochowError::Config(err.to_string())
    }
}
