use catalog_select::ui::output;

fn main() {
    if let Err(err) = catalog_select::cli::run() {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
