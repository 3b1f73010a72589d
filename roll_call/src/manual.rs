/*!

This is the long-form manual for `roll_call` and `betrayal`.

## Definitions

A *roll call* is one recorded vote of the chamber. Every senator present answers
aye or nay (or guilty / not guilty in an impeachment trial). The clerk records
the result as a sentence such as `Bill Passed` or `Cloture Motion Rejected`,
which tells which side won.

For each party, the *party breakdown* is the fraction of its ballots on each side.
A party *prevails* when strictly more than half of its ballots are on the winning
side. An even split does not prevail.

Every ballot is then flagged:
- *betrayed* (effective betrayal): the ballot is on the winning side, but the
  party did not prevail.
- *futile* (futile betrayal): the ballot is on the losing side, while the party
  prevailed.

A ballot is never both.

## Majority rules

| rule  | ayes needed against `n` nays | nays needed against `a` ayes |
|-------|------------------------------|------------------------------|
| `1/2` | `n + 1`                      | `a`                          |
| `2/3` | `2n + 1`                     | `a / 2`                      |
| `3/5` | `3n / 2 + 1`                 | `2a / 3`                     |

Divisions round down, and ties go to the nays.

## Necessity

The betrayals of a roll call were *necessary* when the ballots of the winning side,
without the betrayals, fall short of the number required by the majority rule.
A roll call without betrayals never needs them.

## Input files

`betrayal` reads the files published by govtrack.us:

* `<data>/legislators/legislators-current.yaml` and
  `<data>/legislators/legislators-historical.yaml`
  ([current](https://www.govtrack.us/data/congress-legislators/legislators-current.yaml),
  [historical](https://www.govtrack.us/data/congress-legislators/legislators-historical.yaml))
* all the JSON files below `<data>/<year>/`, one per roll call
  (`https://www.govtrack.us/data/congress/<session>/votes/<year>/s*`).

Only senators (who have a `lis` identifier) are loaded.

## Configuration

Options can be passed on the command line or in a JSON file given with `--config`:

```text
{
  "dataDirectory": "data",
  "years": ["2013", "2014"],
  "onlyCurrent": true,
  "onlyNecessary": false,
  "limit": 20,
  "sortBy": "success-pct",
  "cohort": ["S313", "S270"]
}
```

The command line takes precedence. The ranking keys are `ballots`, `defections`,
`defection-pct`, `effective`, `futile` and `success-pct`.

 */
