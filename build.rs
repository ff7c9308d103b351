fn main() {
    // Propagates the ESP-IDF cfg/link args when building for the board.
    // On a host build esp-idf-sys is not built, so nothing is emitted.
    embuild::espidf::sysenv::output();
}
