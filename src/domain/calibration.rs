//! Validated curve parameters.

use core::fmt;

use super::{
    EngineIdentity, FixedDecimal, Percentage, PoolId, Timestamp, Token, SECONDS_PER_YEAR,
};
use crate::error::{Result, RmmError};

/// Smallest accepted sigma (0.01%).
pub const MIN_SIGMA_BPS: u32 = 1;
/// Largest accepted sigma (100 000%).
pub const MAX_SIGMA_BPS: u32 = 10_000_000;
/// Smallest accepted gamma (10% fee).
pub const MIN_GAMMA_BPS: u32 = 9_000;
/// Gamma must stay strictly below this (a fee of zero is not deployable).
pub const MAX_GAMMA_BPS: u32 = 10_000;

/// Names the calibration field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationField {
    /// Strike price.
    Strike,
    /// Implied volatility.
    Sigma,
    /// Expiry timestamp.
    Maturity,
    /// Fee complement.
    Gamma,
    /// Timestamp tau is measured from.
    LastTimestamp,
}

impl fmt::Display for CalibrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strike => write!(f, "strike"),
            Self::Sigma => write!(f, "sigma"),
            Self::Maturity => write!(f, "maturity"),
            Self::Gamma => write!(f, "gamma"),
            Self::LastTimestamp => write!(f, "last_timestamp"),
        }
    }
}

/// Whether a pool still trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolStatus {
    /// `now < maturity`.
    Active,
    /// `now ≥ maturity`; the curve collapses to the call's intrinsic payoff.
    Expired,
}

/// Immutable parameters of one RMM-01 pool.
///
/// # Invariants
///
/// - `1 ≤ sigma ≤ 10 000 000` bp
/// - `9 000 ≤ gamma < 10 000` bp
/// - `0 < maturity < 2^32 − 1`
/// - `strike > 0`, expressed at the stable token's decimals
///
/// [`without_fee`](Self::without_fee) is the only way to obtain a gamma of
/// exactly 100%, and only for what-if previews.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use rmm_engine::domain::{
///     Calibration, Decimals, EngineIdentity, Percentage, PoolStatus, Timestamp, Token,
/// };
///
/// let risky = Token::new(Address::repeat_byte(1), Decimals::new(18).expect("valid"));
/// let stable = Token::new(Address::repeat_byte(2), Decimals::new(6).expect("valid"));
/// let engine = EngineIdentity::new(Address::repeat_byte(0x11), risky, stable).expect("distinct");
///
/// let cal = Calibration::new(
///     engine,
///     stable.parse_amount("10").expect("valid"),
///     Percentage::new(1_000),
///     Timestamp::new(1_731_556_952),
///     Percentage::new(9_900),
///     Timestamp::new(1_700_000_000),
/// )
/// .expect("valid calibration");
///
/// assert_eq!(cal.status(Timestamp::new(1_700_000_000)), PoolStatus::Active);
/// assert_eq!(cal.fee(), Percentage::new(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calibration {
    engine: EngineIdentity,
    strike: FixedDecimal,
    sigma: Percentage,
    maturity: Timestamp,
    gamma: Percentage,
    last_timestamp: Timestamp,
}

impl Calibration {
    /// Creates a validated calibration.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DecimalMismatch`] if `strike` is not at stable decimals.
    /// - [`RmmError::InvalidCalibration`] naming the first field out of bounds.
    pub fn new(
        engine: EngineIdentity,
        strike: FixedDecimal,
        sigma: Percentage,
        maturity: Timestamp,
        gamma: Percentage,
        last_timestamp: Timestamp,
    ) -> Result<Self> {
        strike.ensure_decimals(engine.stable().decimals())?;
        if strike.is_zero() {
            return Err(invalid(CalibrationField::Strike, "strike must be positive"));
        }
        if !(MIN_SIGMA_BPS..=MAX_SIGMA_BPS).contains(&sigma.bps()) {
            return Err(invalid(
                CalibrationField::Sigma,
                "sigma must be in 1..=10000000 bps",
            ));
        }
        if maturity.get() == 0 || maturity.get() == u32::MAX {
            return Err(invalid(
                CalibrationField::Maturity,
                "maturity must be in 1..2^32-1",
            ));
        }
        if !(MIN_GAMMA_BPS..MAX_GAMMA_BPS).contains(&gamma.bps()) {
            return Err(invalid(
                CalibrationField::Gamma,
                "gamma must be in 9000..10000 bps",
            ));
        }
        if last_timestamp.get() == u32::MAX {
            return Err(invalid(
                CalibrationField::LastTimestamp,
                "last timestamp must be below 2^32-1",
            ));
        }
        Ok(Self {
            engine,
            strike,
            sigma,
            maturity,
            gamma,
            last_timestamp,
        })
    }

    /// Returns the engine identity.
    #[must_use]
    pub const fn engine(&self) -> EngineIdentity {
        self.engine
    }

    /// Returns the risky token.
    #[must_use]
    pub const fn risky(&self) -> Token {
        self.engine.risky()
    }

    /// Returns the stable token.
    #[must_use]
    pub const fn stable(&self) -> Token {
        self.engine.stable()
    }

    /// Returns the strike, in stable units.
    pub const fn strike(&self) -> FixedDecimal {
        self.strike
    }

    /// Returns sigma.
    #[must_use]
    pub const fn sigma(&self) -> Percentage {
        self.sigma
    }

    /// Returns the maturity timestamp.
    #[must_use]
    pub const fn maturity(&self) -> Timestamp {
        self.maturity
    }

    /// Returns gamma (`1 − fee`).
    #[must_use]
    pub const fn gamma(&self) -> Percentage {
        self.gamma
    }

    /// Returns the swap fee, `100% − gamma`.
    #[must_use]
    pub const fn fee(&self) -> Percentage {
        self.gamma.complement()
    }

    /// Returns the timestamp tau is measured from.
    #[must_use]
    pub const fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    /// Returns the on-chain pool identifier.
    #[must_use]
    pub fn pool_id(&self) -> PoolId {
        PoolId::compute(
            self.engine.address(),
            self.strike.raw(),
            self.sigma,
            self.maturity,
            self.gamma,
        )
    }

    /// Seconds from the last timestamp to maturity, zero once expired.
    #[must_use]
    pub const fn tau_seconds(&self) -> u32 {
        self.last_timestamp.seconds_until(self.maturity)
    }

    /// Time to maturity in years of 31 556 952 seconds.
    #[must_use]
    pub fn tau_years(&self) -> f64 {
        f64::from(self.tau_seconds()) / f64::from(SECONDS_PER_YEAR)
    }

    /// Active or expired relative to `now`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> PoolStatus {
        if now < self.maturity {
            PoolStatus::Active
        } else {
            PoolStatus::Expired
        }
    }

    /// Seconds left until maturity as seen at `now`.
    #[must_use]
    pub const fn remaining(&self, now: Timestamp) -> u32 {
        now.seconds_until(self.maturity)
    }

    /// Copy measured from a new last timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidCalibration`] for `u32::MAX`.
    pub fn at_timestamp(&self, timestamp: Timestamp) -> Result<Self> {
        if timestamp.get() == u32::MAX {
            return Err(invalid(
                CalibrationField::LastTimestamp,
                "last timestamp must be below 2^32-1",
            ));
        }
        Ok(Self {
            last_timestamp: timestamp,
            ..*self
        })
    }

    /// Copy with gamma set to 100%, for fee-free what-if previews.
    ///
    /// The result addresses no deployable pool; its [`pool_id`](Self::pool_id)
    /// differs from the original's.
    #[must_use]
    pub const fn without_fee(&self) -> Self {
        Self {
            gamma: Percentage::ONE,
            ..*self
        }
    }
}

const fn invalid(field: CalibrationField, reason: &'static str) -> RmmError {
    RmmError::InvalidCalibration { field, reason }
}
