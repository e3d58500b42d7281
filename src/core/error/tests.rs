#![cfg(test)]

use super::{
	Error, Fault,
	report::{self, format_into, trim_os_message, try_format_into},
};
use crate::{Err, err, library::open::DEPENDENCY_MISSING, utils::buf};

#[test]
fn trim_period_crlf() {
	assert_eq!(trim_os_message("Access is denied.\r\n"), "Access is denied");
	assert_eq!(trim_os_message("Access is denied.\n"), "Access is denied");
	assert_eq!(trim_os_message("Access is denied."), "Access is denied");
	assert_eq!(trim_os_message("Access is denied"), "Access is denied");
}

#[test]
fn trim_at_most_one_each() {
	assert_eq!(trim_os_message("failed..\n\n"), "failed..\n", "one newline, then nothing else matches");
	assert_eq!(trim_os_message("failed..\r\n"), "failed.", "one period only");
	assert_eq!(trim_os_message("failed\n\r"), "failed\n", "order is newline, return, period");
}

#[test]
fn trim_short_untouched() {
	assert_eq!(trim_os_message(".\r\n"), ".\r\n", "three bytes or fewer pass through raw");
	assert_eq!(trim_os_message("a.\n"), "a.\n");
	assert_eq!(trim_os_message(""), "");
}

#[test]
fn os_fault_display() {
	let fault = Fault::Os {
		code: Some(5),
		message: "Access is denied.\r\n".to_owned(),
	};

	assert_eq!(fault.to_string(), "Access is denied");
	assert_eq!(fault.code(), Some(5));
	assert!(fault.is_os());
}

#[test]
#[cfg(unix)]
fn runtime_fault_display() {
	let fault = Fault::Runtime(libc::ENOENT);
	assert_eq!(fault.to_string(), nix::errno::Errno::ENOENT.desc());
	assert!(!fault.is_os());
}

#[test]
fn loader_fault_without_os_error() {
	let error = libloading::Error::DlOpenUnknown;
	let fault = Fault::from_loader(&error);

	assert_eq!(fault, Fault::Os { code: None, message: error.to_string() });
}

#[test]
fn loader_fault_from_nul_in_name() {
	let source = std::ffi::CString::new("back\0end").err().expect("interior nul");
	let error = libloading::Error::CreateCString { source };

	assert_eq!(Fault::from_loader(&error).code(), None, "no system code behind this failure");
}

#[test]
fn os_description_drops_code_suffix() {
	let code = 2;
	let full = std::io::Error::from_raw_os_error(code).to_string();
	let description = report::os_description(code);

	assert!(!description.is_empty());
	assert!(!description.contains("(os error"), "{description}");
	assert!(full.starts_with(&description), "{full} / {description}");
}

#[test]
fn format_into_counts_without_terminator() {
	let fault = Fault::Os {
		code: None,
		message: "Access is denied.\r\n".to_owned(),
	};

	let mut out = [0xAA_u8; 64];
	let len = format_into(&fault, &mut out);
	assert_eq!(len, "Access is denied".len());
	assert_eq!(out[len], 0, "terminated");
	assert_eq!(buf::as_str(&out), Ok("Access is denied"));
}

#[test]
fn format_into_truncates() {
	let fault = Fault::Os {
		code: None,
		message: "Access is denied.\r\n".to_owned(),
	};

	let mut out = [0xAA_u8; 8];
	assert_eq!(format_into(&fault, &mut out), 7, "capacity minus terminator");
	assert_eq!(&out, b"Access \0");
}

#[test]
fn try_format_into_refuses() {
	let fault = Fault::Os {
		code: None,
		message: "Access is denied.\r\n".to_owned(),
	};

	let mut out = [0xAA_u8; 8];
	let result = try_format_into(&fault, &mut out);
	assert!(
		matches!(result, Err(Error::InsufficientCapacity { needed: 17, capacity: 8 })),
		"{result:?}"
	);
	assert_eq!(out, [0xAA; 8], "nothing written");

	let mut out = [0xAA_u8; 17];
	assert_eq!(try_format_into(&fault, &mut out).ok(), Some(16), "exact fit");
}

#[test]
fn error_report() {
	let error = Error::DependencyMissing { path: "backend.so".to_owned() };
	let mut out = [0_u8; 64];
	let len = error.report(&mut out);

	assert_eq!(buf::as_str(&out), Ok(DEPENDENCY_MISSING));
	assert_eq!(len, DEPENDENCY_MISSING.len());
	assert!(error.is_load_failure());
	assert!(error.fault().is_none(), "canned message has no platform fault");
}

#[test]
fn error_fault() {
	let fault = Fault::Runtime(2);
	let error = Error::LoadFailed {
		path: "backend.so".to_owned(),
		fault: fault.clone(),
	};

	assert_eq!(error.fault(), Some(&fault));
	assert_eq!(error.to_string(), fault.to_string(), "diagnostic is the fault text");
}

#[test]
fn err_macros() {
	let name = "backend";
	let error = err!("no library named {name}");
	assert!(matches!(&error, Error::Err(msg) if msg == "no library named backend"), "{error:?}");

	let result: Result<(), Error> = Err!(Unloaded("{name}"));
	assert!(matches!(&result, Err(Error::Unloaded(path)) if path == "backend"), "{result:?}");
}

#[test]
#[cfg(unix)]
fn nothing_pending() {
	report::clear();
	assert_eq!(report::capture(), None);

	let mut out = [0xAA_u8; 16];
	assert_eq!(report::last_error_string(&mut out), 0);
	assert_eq!(out, [0xAA; 16], "nothing written");
}

#[test]
#[cfg(unix)]
fn loader_tier_first() {
	report::clear();

	// SAFETY: the path does not exist; nothing is mapped.
	let handle = unsafe { libc::dlopen(c"/nonexistent/modlink/libbackend.so".as_ptr(), libc::RTLD_NOW) };
	assert!(handle.is_null());

	let fault = report::capture().expect("pending loader error");
	assert!(fault.is_os(), "loader tier wins over errno: {fault:?}");
	assert!(fault.to_string().contains("libbackend.so"), "{fault}");
}

#[test]
#[cfg(unix)]
fn runtime_tier() {
	report::clear();

	// SAFETY: closing an invalid descriptor only sets errno.
	let rc = unsafe { libc::close(-1) };
	assert_eq!(rc, -1);

	assert_eq!(report::capture(), Some(Fault::Runtime(libc::EBADF)));

	let mut out = [0_u8; 256];
	let len = report::last_error_string(&mut out);
	assert_eq!(buf::as_str(&out), Ok(nix::errno::Errno::EBADF.desc()));
	assert_eq!(len, nix::errno::Errno::EBADF.desc().len());
}
