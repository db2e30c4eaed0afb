fn main() {
    airpark_frontend::bootstrap();
}
