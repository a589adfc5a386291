fn main() -> leafbridge_node::Result<()> {
    leafbridge_node::run()
}
