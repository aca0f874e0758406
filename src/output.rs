use colored::Colorize;
use slump::RenderError;

pub fn rendered(text: &str) {
    println!("{}", text);
}

pub fn render_error(error: &RenderError) {
    let kind = match error.is_parse() {
        true => "parse error",
        false => "render error",
    };

    eprintln!("{}{}{}", kind.red().bold(), ": ".white(), error.to_string().red());
}

pub fn file_error(path: &str, error: &dyn std::error::Error) {
    eprintln!(
        "{}{}{}{}",
        "Error reading '".white(),
        path.yellow(),
        "': ".white(),
        error.to_string().red()
    );
}
