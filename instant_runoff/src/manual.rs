/*!

This is the long-form manual for `instant_runoff` and `irvtally`.

## The tabulation rule

Every ballot is a complete strict ranking of the candidates: each of the
`N` registered candidates appears exactly once, most preferred first.
Tabulation proceeds in rounds:

1. Each ballot contributes one vote to its current front preference.
2. A candidate holding strictly more than half of the ballots wins. With
   an even number of ballots, exactly half is not enough.
3. Otherwise the candidate ranked last in the round tally is eliminated
   and every ballot fronting it moves to its next preference.

Ties for the fewest votes are resolved deterministically: the round tally
ranks candidates by count in descending order, with ties keeping the order
in which the count first encountered them across the ballot batch. The
final entry of that ranking is the one eliminated. Only one candidate is
eliminated per round.

Note that a ballot advances by exactly one preference when its front is
eliminated. The newly exposed preference may name a candidate that was
eliminated in an earlier round, and the ballot then counts for that
candidate until it advances again. This matches the reference tabulator
this crate reproduces.

## The merged-electorate paradox

Instant-runoff elections are not monotonic across electorates: a candidate
can carry a district and still lose the union of two districts, without a
single voter reversing a ranking, because the elimination order is
sensitive to the full coalition.

The `demos/` directory carries a worked example over the candidates
`Chan`, `Valdez`, `Ali` and `Jones`:

* `demos/paradox_district_a.json` — Chan wins with 3 of 5 ballots.
* `demos/paradox_district_b.json` — Jones wins with 3 of 5 ballots.
* `demos/paradox.json` — the two districts merged. Jones is eliminated in
  the first round and Chan wins with 6 of 10 ballots.

```bash
irvtally --input demos/paradox_district_b.json
irvtally --input demos/paradox.json
```

## Input formats

The following formats are supported by the `irvtally` binary:

### `json`

An election description file:

```text
{
    "name": "City council, district 5",
    "candidates": ["Chan", "Valdez", "Ali", "Jones"],
    "ballots": [[1, 4, 3, 2], [2, 4, 1, 3]]
}
```

The `name` field is optional. Each ballot lists 1-based candidate
identifiers from most to least preferred and must rank every candidate
exactly once.

### `csv`

One ballot per row of numeric ranks, without a header:

```text
1,4,3,2
2,4,1,3
```

The candidate names are not part of the file and must be supplied with the
`--candidates` flag, in identifier order.

## Output

The summary of the election is written in JSON, one entry per round with
the tally and the eliminated candidate, plus the winner pair. Use `--out`
to write it to a file and `--reference` to compare the computed summary
against a previously recorded one.

*/
