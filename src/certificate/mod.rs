/*! The certificate emitter (§4.8): renders a [`crate::analysis::TaskAnalysisResults`]
into a deterministic Coq/Prosa proof script by substituting wildcards into
one of four templates keyed on (policy, preemption).
*/

pub mod templates;

use regex::Regex;

use crate::analysis::{Shaped, TaskAnalysisResults};
use crate::error::EmitterError;
use crate::problem::{Problem, SchedulingPolicy};
use crate::task::{ArrivalModel, Task};

/// Replace `wildcard` in `text` with `patch`. A single-line patch is a
/// plain substring replacement; a multi-line patch has every line after
/// the first reindented to the column at which the wildcard appeared
/// (§4.8, "Indentation rule for multi-line substitutions").
pub fn patch(text: &str, wildcard: &str, patch: &str) -> String {
    let patch_lines: Vec<&str> = patch.split('\n').collect();
    if patch_lines.len() == 1 {
        return text.replace(wildcard, patch);
    }

    let re = Regex::new(&format!("(?m)^(.*){}", regex::escape(wildcard))).unwrap();
    re.replace_all(text, |caps: &regex::Captures| {
        let indent = &caps[1];
        let follow_indent: String = indent.chars().map(|c| if c.is_whitespace() { c } else { ' ' }).collect();
        let mut out = String::new();
        out.push_str(indent);
        out.push_str(patch_lines[0]);
        for line in &patch_lines[1..] {
            out.push('\n');
            out.push_str(&follow_indent);
            out.push_str(line);
        }
        out
    })
    .into_owned()
}

/// Cut (or merely remove) the region between a start/end wildcard pair
/// (§4.8). When `cut` is true, the delimiters and everything between
/// them are removed from `text`, and the enclosed text is returned as
/// the second element. When `cut` is false, only the delimiters are
/// removed and the enclosed text is left in place.
pub fn conditional_cut_patch(text: &str, wildcard_start: &str, wildcard_end: &str, cut: bool) -> (String, String) {
    if cut {
        let re = Regex::new(&format!(
            "(?s){}([\\s\\S]*){}",
            regex::escape(wildcard_start),
            regex::escape(wildcard_end)
        ))
        .unwrap();
        let cut_text = re
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();
        (re.replace(text, "").into_owned(), cut_text)
    } else {
        (text.replace(wildcard_start, "").replace(wildcard_end, ""), String::new())
    }
}

/// Render a list of values as a Coq `seq` list literal: `[:: a; b; c]`.
pub fn coq_list<T: std::fmt::Display>(items: &[T]) -> String {
    let body = items.iter().map(T::to_string).collect::<Vec<_>>().join("; ");
    format!("[:: {}]", body)
}

fn shaped_to_flat_coq_list<T: std::fmt::Display + Copy>(shaped: &Shaped<T>) -> String {
    match shaped {
        Shaped::Flat(v) => coq_list(v),
        Shaped::PerInterferer(v) => coq_list(&v.iter().flatten().copied().collect::<Vec<_>>()),
    }
}

fn arrival_text(arrival: &ArrivalModel) -> String {
    match arrival {
        ArrivalModel::Periodic { period } | ArrivalModel::Sporadic { min_inter_arrival: period } => period.to_string(),
        ArrivalModel::ArrivalCurveModel(curve) => {
            let steps: Vec<String> = curve.steps().iter().map(|(t, n)| format!("({t}, {n})")).collect();
            format!("ArrivalPrefix_T ({}, {})", curve.horizon(), coq_list(&steps))
        }
    }
}

/// One task's Coq record, e.g. `Definition tsk01 := {| ... |}.` (§4.8).
fn task_declaration(policy: SchedulingPolicy, t: &Task) -> String {
    let mut dec = templates::task_declaration(policy).to_string();
    dec = patch(&dec, templates::WC_TASK_NAME, &t.name());
    dec = patch(&dec, templates::WC_TASK_ID, &t.id().to_string());
    dec = patch(&dec, templates::WC_TASK_COST, &t.wcet().to_string());
    dec = patch(&dec, templates::WC_TASK_DEADLINE, &t.deadline().to_string());
    dec = patch(&dec, templates::WC_TASK_ARRIVAL, &arrival_text(t.arrival()));
    if let SchedulingPolicy::FixedPriority = policy {
        let priority = t.priority().expect("FP task must have a priority");
        dec = patch(&dec, templates::WC_TASK_PRIORITY, &priority.to_string());
    }
    dec
}

/// The full task-set declaration block: one [`task_declaration`] per
/// task, joined by newlines, in task-set order (§4.8).
fn task_set_declaration(problem: &Problem) -> String {
    problem
        .tasks()
        .iter()
        .map(|t| task_declaration(problem.policy(), t))
        .collect::<Vec<_>>()
        .join("\n")
}

fn task_set_list(problem: &Problem) -> String {
    let names: Vec<String> = problem.tasks().iter().map(Task::name).collect();
    coq_list(&names)
}

/// The `Let Fs := ...` declaration. EDF's per-interferer `Fs` is
/// flattened before rendering; FP's is already flat (§4.8).
fn f_solutions(fs: &Shaped<u128>) -> String {
    format!("Let Fs : seq N := {}%N.", shaped_to_flat_coq_list(fs))
}

/// Render the certificate for `tsk` given the rest of `problem` and its
/// analysis `results` (§4.8).
///
/// Returns `(proof, declaration)`: when `split_declaration` is true, the
/// task-set declaration block is excised from `proof` and returned
/// separately as `declaration`, and `proof` gains a leading `Require
/// Import task_set.` line; otherwise `declaration` is empty and the
/// block stays inline.
pub fn generate_proof(
    problem: &Problem,
    tsk: &Task,
    results: &TaskAnalysisResults,
    bounded_tardiness_allowed: bool,
    split_declaration: bool,
) -> Result<(String, String), EmitterError> {
    let mut proof = templates::main_certificate(problem.policy(), problem.preemption()).to_string();

    let l = results.l.ok_or(EmitterError::MissingWildcard(templates::WC_MAX_BUSY_INTERVAL))?;
    let r = results.r.ok_or(EmitterError::MissingWildcard(templates::WC_RESPONSE_TIME_BOUND))?;

    proof = patch(&proof, templates::WC_TASK_SET_DECLARATION, &task_set_declaration(problem));
    proof = patch(&proof, templates::WC_TASK_SET_LIST, &task_set_list(problem));
    proof = patch(&proof, templates::WC_TASK_UNDER_ANALYSIS, &tsk.name());
    proof = patch(&proof, templates::WC_MAX_BUSY_INTERVAL, &format!("{l}%N"));
    proof = patch(&proof, templates::WC_RESPONSE_TIME_BOUND, &format!("{r}%N"));
    proof = patch(&proof, templates::WC_SEARCH_SPACE, &shaped_to_flat_coq_list(&results.ss));
    let ss_size = match &results.ss {
        Shaped::Flat(v) => v.len(),
        Shaped::PerInterferer(v) => v.iter().map(Vec::len).sum(),
    };
    proof = patch(&proof, templates::WC_SEARCH_SPACE_SIZE, &ss_size.to_string());
    proof = patch(&proof, templates::WC_F_SOLUTIONS, &f_solutions(&results.fs));

    let use_tardiness_bound = bounded_tardiness_allowed && tsk.deadline() < r;
    let tardiness_declaration = if use_tardiness_bound {
        format!("Definition B := {}%N.", r - tsk.deadline())
    } else {
        String::new()
    };
    proof = patch(&proof, templates::WC_TARDINESS_BOUND_DECLARATION, &tardiness_declaration);

    (proof, _) = conditional_cut_patch(
        &proof,
        templates::WC_DEADLINE_IS_RESPECTED_START,
        templates::WC_DEADLINE_IS_RESPECTED_END,
        use_tardiness_bound,
    );
    (proof, _) = conditional_cut_patch(
        &proof,
        templates::WC_TARDINESS_IS_BOUNDED_START,
        templates::WC_TARDINESS_IS_BOUNDED_END,
        !use_tardiness_bound,
    );
    (proof, _) = conditional_cut_patch(
        &proof,
        templates::WC_DEADLINE_IS_RESPECTED_PRINT_START,
        templates::WC_DEADLINE_IS_RESPECTED_PRINT_END,
        use_tardiness_bound,
    );
    (proof, _) = conditional_cut_patch(
        &proof,
        templates::WC_TARDINESS_IS_BOUNDED_PRINT_START,
        templates::WC_TARDINESS_IS_BOUNDED_PRINT_END,
        !use_tardiness_bound,
    );

    let (mut proof, declaration) = conditional_cut_patch(
        &proof,
        templates::WC_DECLARATION_START,
        templates::WC_CERTIFICATE_START,
        split_declaration,
    );
    if split_declaration {
        proof = format!("Require Import {}.\n{}", templates::TASK_SET_DECLARATION_FILE_NAME, proof);
    }

    Ok((proof, declaration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResults;
    use crate::problem::PreemptionModel;
    use crate::task::ArrivalModel;

    fn periodic(id: u64, wcet: u128, deadline: u128, period: u128, priority: Option<u32>) -> Task {
        Task::new(id, deadline, wcet, priority, ArrivalModel::Periodic { period }).unwrap()
    }

    #[test]
    fn patch_preserves_indentation_for_multiline_values() {
        let template = "begin\n    $X$\nend";
        let out = patch(template, "$X$", "line one\nline two");
        assert_eq!(out, "begin\n    line one\n    line two\nend");
    }

    #[test]
    fn patch_is_plain_replace_for_single_line_values() {
        let out = patch("a $X$ b", "$X$", "42");
        assert_eq!(out, "a 42 b");
    }

    #[test]
    fn conditional_cut_patch_removes_enclosed_text_when_cutting() {
        let text = "I am $X$not $Y$a bunny.";
        let (out, cut) = conditional_cut_patch(text, "$X$", "$Y$", true);
        assert_eq!(out, "I am a bunny.");
        assert_eq!(cut, "not ");
    }

    #[test]
    fn conditional_cut_patch_keeps_enclosed_text_when_not_cutting() {
        let text = "I am $X$not $Y$a bunny.";
        let (out, _) = conditional_cut_patch(text, "$X$", "$Y$", false);
        assert_eq!(out, "I am not a bunny.");
    }

    #[test]
    fn generate_proof_selects_deadline_respected_branch_when_within_deadline() {
        let tasks = vec![periodic(1, 1, 5, 5, Some(1)), periodic(2, 2, 10, 10, Some(2))];
        let problem = Problem::new(SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive, tasks).unwrap();
        let analysis = AnalysisResults::analyze(&problem);
        let (tsk, results) = analysis.for_task(0).unwrap();
        let (proof, declaration) = generate_proof(&problem, tsk, results, false, false).unwrap();
        assert!(proof.contains("deadline_is_respected"));
        assert!(!proof.contains("tardiness_is_bounded"));
        assert!(declaration.is_empty());
    }

    #[test]
    fn generate_proof_is_deterministic() {
        // property 7
        let tasks = vec![periodic(1, 1, 5, 5, Some(1)), periodic(2, 2, 10, 10, Some(2))];
        let problem = Problem::new(SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive, tasks).unwrap();
        let analysis = AnalysisResults::analyze(&problem);
        let (tsk, results) = analysis.for_task(0).unwrap();
        let (proof1, _) = generate_proof(&problem, tsk, results, false, false).unwrap();
        let (proof2, _) = generate_proof(&problem, tsk, results, false, false).unwrap();
        assert_eq!(proof1, proof2);
    }

    #[test]
    fn generate_proof_splits_declaration_when_requested() {
        // scenario: "Emitter split declaration"
        let tasks = vec![periodic(1, 1, 5, 5, Some(1)), periodic(2, 2, 10, 10, Some(2))];
        let problem = Problem::new(SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive, tasks).unwrap();
        let analysis = AnalysisResults::analyze(&problem);
        let (tsk, results) = analysis.for_task(0).unwrap();

        let (proof_split, declaration) = generate_proof(&problem, tsk, results, false, true).unwrap();
        assert!(!declaration.is_empty());
        assert!(proof_split.starts_with("Require Import task_set."));
        assert!(!proof_split.contains("Definition tsk01"));

        let (proof_unsplit, declaration_empty) = generate_proof(&problem, tsk, results, false, false).unwrap();
        assert!(declaration_empty.is_empty());
        assert!(proof_unsplit.contains("Definition tsk01"));
    }
}
