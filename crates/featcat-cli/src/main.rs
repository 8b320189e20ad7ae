mod command;
mod source;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
