fn main() {
    uniffi::generate_scaffolding("src/pegpro.udl").unwrap();
}
