fn main() {
    nova_raiders::game::run();
}
