fn main() {
    turing::term::main()
}
