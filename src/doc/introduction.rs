/*!
# Introduction

A program describes one deterministic Turing machine. You declare the tape
alphabet, optionally lay out the initial tape, and write procedures built
from head moves, writes, conditions on the symbol under the head, and a
single 8-bit counter variable.

The compiler turns the program into a transition table; nothing of the
language survives to run time. Control flow, procedure calls and the
variable all become states and transitions over a tape that is blank except
where you (or the variable zone) wrote to it.

Ten cells to the left of position 0 are reserved: they hold the variable `x`
between two sentinels. Your program never addresses them directly; `x = n`,
`x++`, `x--` and the conditions `x < n` / `x > n` are the only doors in, and
the generated code always puts the head back where it was afterwards.

A quick session with the shell:

```text
$ turing demos/counter.tm
> run
halted after 94 steps
0..3:  1  1  1 [ ]
> quit
```
*/
