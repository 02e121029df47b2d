fn main() {
    netrpc::cli::main::run();
}
