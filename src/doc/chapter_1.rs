/*!
# Chapter 1: The Language

## Directives

`Set_alphabet "a b c";` declares the tape symbols, separated by spaces. It
must come first and exactly once. The blank is always part of the alphabet
and is written `blank` in programs; the names `BOM`, `EOM`, `0_`, `1_` and
`#` belong to the machine and are rejected.

`Setup "a b blank c";` lays symbols on the tape from position 0 rightwards.
It is optional, comes after `Set_alphabet`, and at most once.

## Procedures

```text
proc main() {
    move_right;
    write "b";
}
```

Every program with procedures needs `main`; it is the entry point.
Procedures take no arguments and return nothing. `call name;` splices the
body of `name` in at the call site during compilation, so a procedure may
not call itself, directly or through others.

## Statements

| Statement | Effect |
|-----------|--------|
| `move_left;` / `move_right;` | move the head one user cell |
| `write "a";` | write a symbol at the head |
| `call name;` | inline a procedure |
| `if (cond) { ... } else { ... }` | branch on a condition |
| `while (cond) { ... }` | loop while a condition holds |
| `x = n;` | set the variable, n in [-128, 127] |
| `x++;` / `x--;` | increment / decrement with i8 wrap-around |

`else if` chains work as expected. Comments are `//` to end of line or
`/* ... */`.

## Conditions

`read == "a"`, `read != "blank"`, `x < n`, `x > n`, combined with `not`,
`and`, `xor`, `or` (loosest last) and parentheses. Comparisons are signed;
`x < -3` and `x > -3` are both false exactly when `x` is -3.
*/
