fn main() -> anyhow::Result<()> {
    natal_wizard::cli::main()
}
