//! NETIO CLI Client
//!
//! Command-line interface for controlling a NETIO power socket.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netio::{Config, Device};

/// NETIO CLI
#[derive(Parser, Debug)]
#[command(name = "netio-cli")]
#[command(about = "CLI for NETIO networked power sockets", version)]
struct Args {
    /// Device hostname or IP address
    #[arg(short = 'H', long)]
    host: String,

    /// KShell TCP port
    #[arg(short, long, default_value_t = netio::config::DEFAULT_PORT)]
    port: u16,

    /// Login username
    #[arg(short, long, default_value = netio::config::DEFAULT_USERNAME)]
    username: String,

    /// Login password
    #[arg(short = 'w', long, default_value = netio::config::DEFAULT_PASSWORD)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the firmware version
    Version,

    /// Print the device uptime
    Uptime,

    /// Print the MAC address
    Mac,

    /// Print the device time
    Time,

    /// Print or set the device name
    Alias {
        /// New name; omit to read the current one
        name: Option<String>,
    },

    /// Operate on a single outlet
    Port {
        /// Outlet number (1-4)
        number: u8,

        #[command(subcommand)]
        action: PortAction,
    },

    /// Set all four outlets from a state string (e.g. "01iu")
    Ports {
        /// One of 0/1/i/u per outlet
        states: String,
    },

    /// Reboot the device
    Reboot,

    /// Send a keep-alive
    Noop,

    /// Send a raw command line and print the raw reply
    Raw {
        /// The command line to send
        line: String,
    },
}

#[derive(Subcommand, Debug)]
enum PortAction {
    /// Print the outlet state
    Status,
    /// Switch the outlet on
    On,
    /// Switch the outlet off
    Off,
    /// Flip the outlet
    Toggle,
    /// Put the outlet into manual mode
    Manual,
    /// Print the outlet's setup line
    Setup,
    /// Print the outlet's configured name
    Name,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> netio::Result<()> {
    let config = Config::builder()
        .host(args.host)
        .port(args.port)
        .username(args.username)
        .password(args.password)
        .build();

    let mut device = Device::new(config)?;

    match args.command {
        Commands::Version => print_optional(device.version()?),
        Commands::Uptime => print_optional(device.uptime()?),
        Commands::Mac => print_optional(device.mac()?),
        Commands::Time => print_optional(device.time()?),
        Commands::Alias { name: Some(name) } => print_ack(device.set_alias(&name)?),
        Commands::Alias { name: None } => print_optional(device.alias()?),
        Commands::Port { number, action } => match action {
            PortAction::Status => match device.port_state(number)? {
                Some(state) => println!("{}", state.as_char()),
                None => println!("(unknown)"),
            },
            PortAction::On => print_ack(device.set_port_on(number)?),
            PortAction::Off => print_ack(device.set_port_off(number)?),
            PortAction::Toggle => print_ack(device.toggle_port(number)?),
            PortAction::Manual => print_ack(device.set_port_manual(number)?),
            PortAction::Setup => print_optional(device.port_setup(number)?),
            PortAction::Name => print_optional(device.port_name(number)?),
        },
        Commands::Ports { states } => print_ack(device.set_ports(&states)?),
        Commands::Reboot => print_ack(device.reboot()?),
        Commands::Noop => {
            device.noop()?;
            println!("ok");
        }
        Commands::Raw { line } => println!("{}", device.execute(&line)?),
    }

    Ok(())
}

fn print_optional(value: Option<impl std::fmt::Display>) {
    match value {
        Some(value) => println!("{value}"),
        None => println!("(no response)"),
    }
}

fn print_ack(ok: bool) {
    if ok {
        println!("ok");
    } else {
        println!("rejected");
    }
}
