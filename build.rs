pub fn main() {
    odra_build::build();
}
