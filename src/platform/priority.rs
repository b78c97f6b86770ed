// Platform-specific process niceness lookup

use crate::error::ProcessReadError;

/// Get the nice value of a process (lower value runs first)
#[cfg(target_os = "linux")]
pub fn process_nice(pid: u32) -> Result<i32, ProcessReadError> {
    let stat = std::fs::read_to_string(format!("/proc/{}/stat", pid)).map_err(read_error)?;
    parse_stat_nice(&stat).ok_or(ProcessReadError::NoSuchProcess)
}

#[cfg(all(unix, not(target_os = "linux")))]
pub fn process_nice(pid: u32) -> Result<i32, ProcessReadError> {
    // getpriority returns -1 both for errors and for nice -1, so errno decides
    let nice = unsafe { libc::getpriority(libc::PRIO_PROCESS, pid as libc::id_t) };
    if nice == -1 {
        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::ESRCH) => return Err(ProcessReadError::NoSuchProcess),
            Some(libc::EPERM) | Some(libc::EACCES) => {
                return Err(ProcessReadError::AccessDenied)
            }
            _ => {}
        }
    }
    Ok(nice)
}

#[cfg(not(unix))]
pub fn process_nice(_pid: u32) -> Result<i32, ProcessReadError> {
    Ok(0)
}

#[cfg(target_os = "linux")]
fn read_error(err: std::io::Error) -> ProcessReadError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => ProcessReadError::AccessDenied,
        _ => ProcessReadError::NoSuchProcess,
    }
}

/// Parse the nice field out of a `/proc/<pid>/stat` line.
///
/// The command name may contain spaces and parentheses, so fields are counted
/// from the last `)`. Returns `None` for zombies as well as malformed lines.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_stat_nice(stat: &str) -> Option<i32> {
    let rest = &stat[stat.rfind(')')? + 1..];
    let fields: Vec<&str> = rest.split_whitespace().collect();

    // fields[0] is the state (field 3), nice is field 19
    if fields.first() == Some(&"Z") {
        return None;
    }
    fields.get(16)?.parse().ok()
}
