fn main() {
    cybr_game::game::run();
}
