use snafu::Snafu;

/// Errors raised while connecting to Avail, preparing a data submission,
/// or following it to finalization.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The seed phrase could not be parsed as a secret URI.
    ///
    /// Accepted forms are a BIP-39 phrase, a hex seed, or either of those
    /// followed by derivation junctions such as `//Alice`.
    #[snafu(display("Invalid seed phrase: {source}"))]
    InvalidSecretUri {
        /// The underlying parse error.
        source: subxt_signer::SecretUriError,
    },

    /// An sr25519 keypair could not be derived from the parsed secret URI.
    #[snafu(display("Failed to derive sr25519 keypair: {source}"))]
    Keypair {
        /// The underlying derivation error.
        source: subxt_signer::sr25519::Error,
    },

    /// The RPC endpoint could not be reached or the client could not be built on top of it.
    #[snafu(display("Error connecting to chain at '{url}': {message}"))]
    Connection {
        /// Endpoint that was dialled.
        url: String,
        /// Reason reported by the RPC client.
        message: String,
    },

    /// Chain metadata or state needed to build the extrinsic could not be read.
    ///
    /// Covers the `submit_data` call lookup, the genesis hash, the runtime
    /// version and the account nonce.
    #[snafu(display("Error fetching chain metadata or state: {source}"))]
    Metadata {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// The extrinsic could not be signed.
    #[snafu(display("Error signing extrinsic: {source}"))]
    Signing {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// The node refused the submission, or the status subscription failed.
    #[snafu(display("Error submitting extrinsic: {source}"))]
    Submission {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// The transaction pool reported the transaction as invalid, dropped or errored.
    #[snafu(display("Transaction rejected by the pool: {message}"))]
    TransactionRejected {
        /// Message attached to the terminal status.
        message: String,
    },

    /// The status subscription ended before a finalization event arrived.
    #[snafu(display("Status subscription closed before finalization"))]
    StatusStreamClosed,

    /// The caller cancelled, or the deadline elapsed, before finalization was observed.
    #[snafu(display("da submission timeout"))]
    SubmissionTimeout,

    /// A block could not be fetched while checking inclusion.
    #[snafu(display("Error fetching block: {source}"))]
    BlockFetch {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },
}

/// Type alias for results that return a `Result<T, Error>`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
