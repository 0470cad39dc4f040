//! Normalization of execution receipts into mutation outcomes.

use palisade_transact::{ReceiptParseError, RetCode};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::outcome::RoleChangeOutcome;

/// Interpret a normalized receipt. A non-negative code means the governance
/// call took effect. A negative code is a governance-rule rejection (wrong
/// weight, not authorized, ...) and surfaces as a hard error carrying the
/// ledger's own code and message, distinct from infrastructure failure and
/// never swallowed. An unparseable receipt surfaces the parser's code the
/// same way.
pub fn interpret_receipt(
    parsed: std::result::Result<RetCode, ReceiptParseError>,
) -> Result<RoleChangeOutcome> {
    match parsed {
        Ok(ret_code) if ret_code.code >= 0 => {
            debug!("governance call confirmed: {ret_code}");
            Ok(RoleChangeOutcome::Succeeded {
                message: ret_code.message,
            })
        }
        Ok(ret_code) => {
            error!("governance call rejected: {ret_code}");
            Err(Error::Execution {
                code: ret_code.code,
                message: ret_code.message,
            })
        }
        Err(parse_error) => {
            error!("receipt could not be normalized: {parse_error}");
            Err(Error::Execution {
                code: parse_error.code,
                message: parse_error.message,
            })
        }
    }
}
