mod output;

use camino::Utf8Path;
use clap::ArgAction;
use log::{debug, error, LevelFilter};
use slump::reader::{self, MessageFile};
use slump::{Delimiters, Value};
use std::str::FromStr;

fn setup_logging(verbose: bool) {
    let mut builder = env_logger::builder();
    builder.format_timestamp(None);

    builder.filter_level(match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    });

    builder.init();
}

fn bootstrap_cmd() -> clap::Command {
    let help_template: &'static str = color_print::cstr!(
r#"{about}

{usage-heading} {usage}

<bold><underline>Arguments:</underline></bold>
{positionals}

<bold><underline>Options:</underline></bold>
{options}
{after-help}
"#);

    clap::Command::new("slump")
        .bin_name("slump")
        .about("Renders a string template")
        .arg_required_else_help(true)
        .args(vec![
            clap::arg!(verbose: -v --verbose "Enables verbose output")
                .action(ArgAction::SetTrue),
            clap::arg!(file: -f --file <FILE> "Reads template, values and delimiters from a KDL file")
                .action(ArgAction::Set),
            clap::arg!(set: -s --set <VALUE> "Sets a value as KEY=VALUE, may be repeated")
                .action(ArgAction::Append),
            clap::arg!(left: --left <MARKER> "Opening delimiter")
                .action(ArgAction::Set),
            clap::arg!(right: --right <MARKER> "Closing delimiter")
                .action(ArgAction::Set),
            clap::arg!(text: [TEXT] "Template text, overrides the file's template"),
        ])
        .help_template(help_template)
}

fn parse_assignment(assignment: &str) -> Option<(&str, Value)> {
    let (key, value) = assignment.split_once('=')?;
    if key.is_empty() {
        return None;
    }

    Some((key, Value::from_str(value).unwrap_or_else(|never| match never {})))
}

fn main() {
    let matches = bootstrap_cmd().get_matches();
    setup_logging(matches.get_flag("verbose"));

    let mut file = match matches.get_one::<String>("file") {
        Some(path) => {
            let path = Utf8Path::new(path);
            match reader::open_and_read(path) {
                Ok(f) => f,
                Err(e) => {
                    output::file_error(path.as_str(), &e);
                    std::process::exit(1);
                }
            }
        }
        None => MessageFile::default(),
    };

    if let Some(text) = matches.get_one::<String>("text") {
        file.template = Some(text.clone());
    }

    for assignment in matches.get_many::<String>("set").unwrap_or_default() {
        let Some((key, value)) = parse_assignment(assignment) else {
            error!("Invalid value '{}', expected KEY=VALUE", assignment);
            std::process::exit(1);
        };

        debug!("Setting '{}' to {:?}", key, value);
        file.values.set(key, value);
    }

    let left = matches.get_one::<String>("left");
    let right = matches.get_one::<String>("right");
    if left.is_some() || right.is_some() {
        let current = file.delimiters.clone().unwrap_or_default();
        let delimiters = Delimiters::new(
            left.map_or(current.left(), String::as_str),
            right.map_or(current.right(), String::as_str),
        );

        match delimiters {
            Ok(d) => file.delimiters = Some(d),
            Err(e) => {
                output::render_error(&e);
                std::process::exit(1);
            }
        }
    }

    match file.into_message().render() {
        Ok(s) => output::rendered(&s),
        Err(e) => {
            output::render_error(&e);
            std::process::exit(1);
        }
    }
}
