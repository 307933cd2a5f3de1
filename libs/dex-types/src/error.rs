use soroban_sdk::contracterror;

/// Errors surfaced by the math libraries and every contract in the workspace.
///
/// Discriminants are grouped by kind and must stay stable: clients match on
/// the numeric code.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DexError {
    // Configuration
    IdenticalTokens = 1,
    InvalidTickRange = 2,
    TickOutOfBounds = 3,
    UnsupportedFee = 4,
    InvalidFee = 5,
    FeeAlreadyEnabled = 6,
    InvalidInitialPrice = 7,

    // State
    PoolNotFound = 20,
    PoolNotInitialized = 21,
    PoolAlreadyInitialized = 22,
    InsufficientPositionLiquidity = 23,
    ZeroLiquidity = 24,
    InsufficientLiquidity = 25,
    InvalidAmount = 26,
    Locked = 27,
    PositionNotFound = 28,
    NotPositionOwner = 29,
    PositionNotEmpty = 30,
    DeadlineExpired = 31,

    // Arithmetic
    MathOverflow = 40,
    DivisionByZero = 41,
    SqrtPriceOutOfBounds = 42,

    // Funding
    InsufficientPayment = 50,

    // Slippage
    PriceLimitOutOfRange = 60,
    SlippageExceeded = 61,
}
