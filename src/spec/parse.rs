use super::error::{Error, Result};

/// Names with this prefix denote merge commits.
pub const MERGE_MARKER: char = 'M';

/// The file-tree operation a commit performs: write `data` at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOp {
    pub path: String,
    pub data: String,
}

/// One commit in a parsed spec.  Parents are in declaration order; merges
/// (two or more parents) carry no tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDescriptor {
    pub name: String,
    pub parents: Vec<String>,
    pub op: Option<TreeOp>,
    pub is_merge: bool,
}

/// Parse spec text into an ordered sequence of commit descriptors and the
/// head commit name.  Output order is declaration order, which the
/// parents-must-precede rule makes a valid topological order.
pub fn parse(text: &str) -> Result<(Vec<CommitDescriptor>, String)> {
    let mut commits: Vec<CommitDescriptor> = vec![];
    let mut head: Option<String> = None;

    for (i, raw) in text.lines().enumerate() {
        let lineno = i + 1;
        // strip comments and surrounding whitespace
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        // split off the optional operation clause
        let (decl, op_clause) = match line.find('=') {
            Some(at) => (line[..at].trim(), Some(line[at + 1..].trim())),
            None => (line, None),
        };

        // split the declaration into name and parent clause
        let (name, parent_clause) = match decl.find(':') {
            Some(at) => (decl[..at].trim(), Some(decl[at + 1..].trim())),
            None => (decl, None),
        };
        if name.is_empty() || name.split_whitespace().count() != 1 {
            return Err(Error::MalformedSpec(format!(
                "line {}: expected a single commit name",
                lineno
            )));
        }

        if name == "head" {
            if head.is_some() {
                return Err(Error::MalformedSpec(format!(
                    "line {}: duplicate head directive",
                    lineno
                )));
            }
            if op_clause.is_some() {
                return Err(Error::MalformedSpec(format!(
                    "line {}: head takes no operation",
                    lineno
                )));
            }
            let target = match parent_clause {
                Some(t) if !t.is_empty() && t.split_whitespace().count() == 1 => t,
                _ => {
                    return Err(Error::MalformedSpec(format!(
                        "line {}: head must name exactly one commit",
                        lineno
                    )))
                }
            };
            if !commits.iter().any(|c| c.name == target) {
                return Err(Error::MalformedSpec(format!(
                    "line {}: head references undeclared commit '{}'",
                    lineno, target
                )));
            }
            head = Some(target.to_string());
            continue;
        }

        if commits.iter().any(|c| c.name == name) {
            return Err(Error::MalformedSpec(format!(
                "line {}: duplicate commit name '{}'",
                lineno, name
            )));
        }

        // no parent clause means "continue from the previous commit"
        let parents: Vec<String> = match parent_clause {
            Some(clause) => clause.split_whitespace().map(str::to_string).collect(),
            None => commits.last().map(|c| vec![c.name.clone()]).unwrap_or_default(),
        };
        for (pi, parent) in parents.iter().enumerate() {
            if !commits.iter().any(|c| &c.name == parent) {
                return Err(Error::MalformedSpec(format!(
                    "line {}: undeclared parent '{}'",
                    lineno, parent
                )));
            }
            if parents[..pi].contains(parent) {
                return Err(Error::MalformedSpec(format!(
                    "line {}: parent '{}' listed twice",
                    lineno, parent
                )));
            }
        }

        let is_merge = parents.len() >= 2;
        if is_merge != name.starts_with(MERGE_MARKER) {
            return Err(Error::MalformedSpec(format!(
                "line {}: '{}' {} the merge marker but has {} parent(s)",
                lineno,
                name,
                if name.starts_with(MERGE_MARKER) { "carries" } else { "lacks" },
                parents.len()
            )));
        }

        let op = match op_clause {
            Some(clause) => {
                if is_merge {
                    return Err(Error::MalformedSpec(format!(
                        "line {}: merge commits take no operation",
                        lineno
                    )));
                }
                Some(parse_op(clause, lineno)?)
            }
            // the default operation writes the commit's own name
            None if !is_merge => Some(TreeOp {
                path: format!("{}.txt", name),
                data: name.to_string(),
            }),
            None => None,
        };

        commits.push(CommitDescriptor {
            name: name.to_string(),
            parents,
            op,
            is_merge,
        });
    }

    let head = head.ok_or_else(|| Error::MalformedSpec("missing head directive".to_string()))?;
    Ok((commits, head))
}

fn parse_op(clause: &str, lineno: usize) -> Result<TreeOp> {
    let mut words = clause.split_whitespace();
    match words.next() {
        Some(path) => {
            let data: Vec<&str> = words.collect();
            if data.is_empty() {
                return Err(Error::MalformedSpec(format!(
                    "line {}: operation needs a path and data",
                    lineno
                )));
            }
            Ok(TreeOp {
                path: path.to_string(),
                data: data.join(" "),
            })
        }
        None => Err(Error::MalformedSpec(format!(
            "line {}: empty operation",
            lineno
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(commits: &[CommitDescriptor]) -> Vec<&str> {
        commits.iter().map(|c| &c.name[..]).collect()
    }

    #[test]
    fn linear_implicit_parents() -> Result<()> {
        let (commits, head) = parse("1\n2\n3\nhead : 3\n")?;
        assert_eq!(names(&commits), vec!["1", "2", "3"]);
        assert_eq!(commits[0].parents, Vec::<String>::new());
        assert_eq!(commits[1].parents, vec!["1"]);
        assert_eq!(commits[2].parents, vec!["2"]);
        assert_eq!(head, "3");
        Ok(())
    }

    #[test]
    fn default_op_writes_own_name() -> Result<()> {
        let (commits, _) = parse("1\nhead : 1\n")?;
        assert_eq!(
            commits[0].op,
            Some(TreeOp {
                path: "1.txt".to_string(),
                data: "1".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn explicit_parents_branch() -> Result<()> {
        let (commits, _) = parse("1\n2\n3 : 1\nhead : 3\n")?;
        assert_eq!(commits[2].parents, vec!["1"]);
        Ok(())
    }

    #[test]
    fn merge_commit() -> Result<()> {
        let (commits, head) = parse("1\n2\n3 : 1\nM1 : 2 3\nhead : M1\n")?;
        let merge = &commits[3];
        assert!(merge.is_merge);
        assert_eq!(merge.parents, vec!["2", "3"]);
        assert_eq!(merge.op, None);
        assert_eq!(head, "M1");
        Ok(())
    }

    #[test]
    fn op_override() -> Result<()> {
        let (commits, _) = parse("1 : = greeting.txt hello there\nhead : 1\n")?;
        assert_eq!(commits[0].parents, Vec::<String>::new());
        assert_eq!(
            commits[0].op,
            Some(TreeOp {
                path: "greeting.txt".to_string(),
                data: "hello there".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn comments_and_blank_lines() -> Result<()> {
        let (commits, head) = parse("# setup\n\n1  # root\n2\n\nhead : 2\n")?;
        assert_eq!(names(&commits), vec!["1", "2"]);
        assert_eq!(head, "2");
        Ok(())
    }

    #[test]
    fn duplicate_name() {
        assert!(parse("1\n1\nhead : 1\n").is_err());
    }

    #[test]
    fn undeclared_parent() {
        assert!(parse("1\n2 : 9\nhead : 2\n").is_err());
    }

    #[test]
    fn parent_listed_twice() {
        assert!(parse("1\n2\nM1 : 2 2\nhead : M1\n").is_err());
    }

    #[test]
    fn missing_head() {
        assert!(parse("1\n2\n").is_err());
    }

    #[test]
    fn head_undeclared() {
        assert!(parse("1\nhead : 2\n").is_err());
    }

    #[test]
    fn duplicate_head() {
        assert!(parse("1\nhead : 1\nhead : 1\n").is_err());
    }

    #[test]
    fn merge_without_marker() {
        assert!(parse("1\n2\n3 : 1 2\nhead : 3\n").is_err());
    }

    #[test]
    fn marker_without_merge() {
        assert!(parse("1\nM1 : 1\nhead : M1\n").is_err());
    }

    #[test]
    fn merge_with_op() {
        assert!(parse("1\n2 : 1\nM1 : 1 2 = f.txt x\nhead : M1\n").is_err());
    }

    #[test]
    fn op_without_data() {
        assert!(parse("1 = lonely.txt\nhead : 1\n").is_err());
    }

    #[test]
    fn error_names_line() {
        match parse("1\n2 : 9\nhead : 2\n") {
            Err(Error::MalformedSpec(msg)) => assert!(msg.contains("line 2")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
