//! fp - find free ports
//!
//! Prints one port per line on success. Any failure goes to stderr with a
//! non-zero exit status and nothing on stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use env_logger::Env;

use freeport::{acquire, AcquisitionRequest, AddressFamily, PortRange, Protocol};

#[derive(Parser, Debug)]
#[command(name = "fp")]
#[command(version, disable_version_flag = true)]
#[command(about = "Find free ports using the kernel's own port allocator", long_about = None)]
struct Cli {
    /// Find NUM free ports (max: 1024)
    #[arg(short = 'n', long = "count", value_name = "NUM", default_value_t = 1)]
    count: usize,

    /// Constrain to port range (1-65535)
    #[arg(short = 'r', long = "range", value_name = "MIN:MAX")]
    range: Option<PortRange>,

    /// Find UDP ports (default: TCP)
    #[arg(short = 'u', long = "udp")]
    udp: bool,

    /// Use IPv6 (default: IPv4)
    #[arg(short = '6', long = "ipv6")]
    ipv6: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    fn request(&self) -> freeport::Result<AcquisitionRequest> {
        let protocol = if self.udp { Protocol::Udp } else { Protocol::Tcp };
        let family = if self.ipv6 {
            AddressFamily::Ipv6
        } else {
            AddressFamily::Ipv4
        };
        AcquisitionRequest::new(self.count, protocol, family, self.range)
    }
}

fn print_ports(ports: &[u16]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for port in ports {
        writeln!(out, "{port}")?;
    }
    out.flush()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ports = match cli.request().and_then(|request| acquire(&request)) {
        Ok(ports) => ports,
        Err(e) => {
            eprintln!("fp: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = print_ports(&ports) {
        eprintln!("fp: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fp"]).unwrap();
        let request = cli.request().unwrap();
        assert_eq!(request, AcquisitionRequest::default());
    }

    #[test]
    fn test_flags_map_to_request() {
        let cli = Cli::try_parse_from(["fp", "-n", "3", "-u", "-6", "-r", "20000:20010"]).unwrap();
        let request = cli.request().unwrap();
        assert_eq!(request.count(), 3);
        assert_eq!(request.protocol(), Protocol::Udp);
        assert_eq!(request.family(), AddressFamily::Ipv6);
        assert_eq!(request.range(), Some(PortRange::new(20000, 20010).unwrap()));
    }

    #[test]
    fn test_bad_range_rejected_by_parser() {
        assert!(Cli::try_parse_from(["fp", "-r", "9000:8000"]).is_err());
        assert!(Cli::try_parse_from(["fp", "-r", "8000"]).is_err());
    }

    #[test]
    fn test_oversized_count_rejected() {
        let cli = Cli::try_parse_from(["fp", "-n", "200", "-r", "8000:8010"]).unwrap();
        assert!(cli.request().unwrap_err().is_config());

        let cli = Cli::try_parse_from(["fp", "-n", "1025"]).unwrap();
        assert!(cli.request().unwrap_err().is_config());
    }
}
