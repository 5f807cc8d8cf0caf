//! Descriptor headroom for unconstrained batches
//!
//! A batch holds every probe socket open at the same time. With the common
//! soft limit of 1024 descriptors a maximum-size batch would hit `EMFILE`, so
//! the soft limit is raised towards the hard limit when needed.

use crate::error::Result;
#[cfg(unix)]
use crate::error::Error;

/// Descriptors kept free for stdio and whatever else the process has open.
pub const RESERVED_DESCRIPTORS: usize = 64;

/// Make sure `needed` more descriptors fit under the soft `RLIMIT_NOFILE`,
/// raising it (never above the hard limit) when they do not.
///
/// Returns the soft limit now in effect.
///
/// # Errors
/// Returns [`Error::SystemCall`] if the limit cannot be read or changed
#[cfg(unix)]
pub fn ensure_descriptor_headroom(needed: usize) -> Result<u64> {
    use log::{debug, warn};
    use nix::sys::resource::{getrlimit, setrlimit, Resource};

    let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE)
        .map_err(|e| Error::system_call("getrlimit(RLIMIT_NOFILE)", e.into()))?;
    let wanted = match needed.saturating_add(RESERVED_DESCRIPTORS).try_into() {
        Ok(wanted) => wanted,
        Err(_) => hard,
    };

    if soft >= wanted {
        return Ok(u64::from(soft));
    }

    let target = wanted.min(hard);
    setrlimit(Resource::RLIMIT_NOFILE, target, hard)
        .map_err(|e| Error::system_call("setrlimit(RLIMIT_NOFILE)", e.into()))?;
    debug!("raised RLIMIT_NOFILE soft limit from {soft} to {target}");

    if target < wanted {
        warn!("descriptor hard limit {hard} is below the {wanted} a batch of {needed} may need");
    }
    Ok(u64::from(target))
}

/// No descriptor limit to adjust on this platform.
///
/// # Errors
/// Never fails
#[cfg(not(unix))]
pub fn ensure_descriptor_headroom(_needed: usize) -> Result<u64> {
    Ok(u64::MAX)
}
