fn main() {
    echelon_shooter::game::run();
}
