//! The per-K sync script.

/// Single-quote a string for bash.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Render the bash script that syncs one K with its upstream.
///
/// The script must be run inside the K's directory. It commits local changes
/// as `<today> Update`, rebases onto remote changes and pushes. If the rebase
/// fails while there are local changes it prints a warning and exits 1; the
/// repository is left as git left it.
pub fn sync_script(k_id: &str, today: &str) -> String {
    let k_id = quote(k_id);
    format!(
        r#"
local_update=false
remote_update=false
if [[ $(git status --porcelain) ]]; then
  local_update=true
fi
git fetch
local_head=$(git rev-parse @)
remote_head=$(git rev-parse @{{u}})
if [[ "${{local_head}}" != "${{remote_head}}" ]]; then
  remote_update=true
fi

if [ "${{local_update}}" == "true" ]; then
  git add .
  git commit -m "{today} Update"
fi
can_push=true
if [ "${{remote_update}}" == "true" ]; then
  git pull --rebase || can_push=false
fi
if [ "${{local_update}}" == "true" ]; then
  if [ "${{can_push}}" == "true" ]; then
    git push
  else
    echo "WARN: cannot push update in "{k_id}" yet!"
    exit 1
  fi
fi
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_steps_in_order() {
        let script = sync_script("work", "2024-05-01");

        let steps = [
            "git status --porcelain",
            "git fetch",
            "git rev-parse @{u}",
            "git add .",
            "git commit -m \"2024-05-01 Update\"",
            "git pull --rebase || can_push=false",
            "git push",
        ];
        let mut last = 0;
        for step in steps {
            let pos = script[last..]
                .find(step)
                .unwrap_or_else(|| panic!("missing or out of order: {step}"));
            last += pos + step.len();
        }
    }

    #[test]
    fn test_script_names_k_in_warning() {
        let script = sync_script("work", "2024-05-01");
        assert!(script.contains("echo \"WARN: cannot push update in \"'work'\" yet!\""));
        assert!(script.contains("exit 1"));
        assert!(script.contains("\"${local_head}\" != \"${remote_head}\""));
    }

    #[test]
    fn test_k_id_is_not_expanded_by_the_shell() {
        let script = sync_script("$(touch pwned)`id`\"", "2024-05-01");
        assert!(script.contains("update in \"'$(touch pwned)`id`\"'\" yet!"));

        let script = sync_script("it's", "2024-05-01");
        assert!(script.contains(r#"update in "'it'\''s'" yet!"#));
    }

    #[test]
    fn test_warning_prints_k_id_verbatim() {
        let script = sync_script("$HOME `id` \"x\"", "2024-05-01");
        let warn = script
            .lines()
            .find(|l| l.contains("WARN"))
            .unwrap()
            .trim()
            .to_string();
        let output = std::process::Command::new("bash")
            .arg("-c")
            .arg(&warn)
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "WARN: cannot push update in $HOME `id` \"x\" yet!\n"
        );
    }
}
