/*! The closed wildcard alphabet and the four certificate templates,
keyed on (policy, preemption) (§4.8).

The wildcard names mirror the original template-path module's constants
exactly (down to the trailing `$`), since both the templates below and
[`super::generate_proof`] depend on the literal text matching.
*/

use crate::problem::{PreemptionModel, SchedulingPolicy};

pub const WC_TASK_SET_LIST: &str = "$TASK_SET_LIST$";
pub const WC_TASK_UNDER_ANALYSIS: &str = "$TASK_UNDER_ANALYSIS$";
pub const WC_TASK_SET_DECLARATION: &str = "$TASK_SET_DECLARATION$";
pub const WC_TASK_NAME: &str = "$TASK_NAME$";
pub const WC_TASK_ID: &str = "$TASK_ID$";
pub const WC_TASK_COST: &str = "$TASK_COST$";
pub const WC_TASK_DEADLINE: &str = "$TASK_DEADLINE$";
pub const WC_TASK_PRIORITY: &str = "$TASK_PRIORITY$";
pub const WC_TASK_ARRIVAL: &str = "$TASK_ARRIVAL$";
pub const WC_MAX_BUSY_INTERVAL: &str = "$MAX_BUSY_INTERVAL$";
pub const WC_RESPONSE_TIME_BOUND: &str = "$RESPONSE_TIME_BOUND$";
pub const WC_SEARCH_SPACE: &str = "$SEARCH_SPACE$";
pub const WC_SEARCH_SPACE_SIZE: &str = "$SEARCH_SPACE_SIZE$";
pub const WC_F_SOLUTIONS: &str = "$F_SOLUTIONS$";
pub const WC_TARDINESS_BOUND_DECLARATION: &str = "$TARDINESS_BOUND_DECLARATION$";

pub const WC_DEADLINE_IS_RESPECTED_START: &str = "$DEADLINE_IS_RESPECTED_START$";
pub const WC_DEADLINE_IS_RESPECTED_END: &str = "$DEADLINE_IS_RESPECTED_END$";
pub const WC_DEADLINE_IS_RESPECTED_PRINT_START: &str = "$DEADLINE_IS_RESPECTED_PRINT_START$";
pub const WC_DEADLINE_IS_RESPECTED_PRINT_END: &str = "$DEADLINE_IS_RESPECTED_PRINT_END$";
pub const WC_TARDINESS_IS_BOUNDED_START: &str = "$TARDINESS_IS_BOUNDED_START$";
pub const WC_TARDINESS_IS_BOUNDED_END: &str = "$TARDINESS_IS_BOUNDED_END$";
pub const WC_TARDINESS_IS_BOUNDED_PRINT_START: &str = "$TARDINESS_IS_BOUNDED_PRINT_START$";
pub const WC_TARDINESS_IS_BOUNDED_PRINT_END: &str = "$TARDINESS_IS_BOUNDED_PRINT_END$";
pub const WC_DECLARATION_START: &str = "$DECLARATION_START$";
pub const WC_CERTIFICATE_START: &str = "$CERTIFICATE_START$";

pub const TASK_SET_DECLARATION_FILE_NAME: &str = "task_set";

/// Picks the certificate template for a (policy, preemption) pair
/// (§4.8).
pub fn main_certificate(policy: SchedulingPolicy, preemption: PreemptionModel) -> &'static str {
    match (policy, preemption) {
        (SchedulingPolicy::FixedPriority, PreemptionModel::FullyPreemptive) => TEMPLATE_FP_FP,
        (SchedulingPolicy::FixedPriority, PreemptionModel::NonPreemptive) => TEMPLATE_FP_NP,
        (SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::FullyPreemptive) => TEMPLATE_EDF_FP,
        (SchedulingPolicy::EarliestDeadlineFirst, PreemptionModel::NonPreemptive) => TEMPLATE_EDF_NP,
    }
}

/// The per-task record template: fixed-priority tasks carry a priority
/// field, EDF tasks do not (§4.8).
pub fn task_declaration(policy: SchedulingPolicy) -> &'static str {
    match policy {
        SchedulingPolicy::FixedPriority => TEMPLATE_TASK_DECLARATION_PRIORITY,
        SchedulingPolicy::EarliestDeadlineFirst => TEMPLATE_TASK_DECLARATION_NO_PRIORITY,
    }
}

pub const TEMPLATE_TASK_DECLARATION_PRIORITY: &str = "Definition $TASK_NAME$ := {|
    task_id := $TASK_ID$;
    task_cost := $TASK_COST$;
    task_deadline := $TASK_DEADLINE$;
    task_arrival := $TASK_ARRIVAL$;
    task_priority := $TASK_PRIORITY$ |}.";

pub const TEMPLATE_TASK_DECLARATION_NO_PRIORITY: &str = "Definition $TASK_NAME$ := {|
    task_id := $TASK_ID$;
    task_cost := $TASK_COST$;
    task_deadline := $TASK_DEADLINE$;
    task_arrival := $TASK_ARRIVAL$ |}.";

const TEMPLATE_FP_FP: &str = "(* Certificate for fully preemptive fixed-priority scheduling. *)
Require Import prosa.behavior.all.
Require Import prosa.model.processor.ideal.
Require Import prosa.model.task.preemption.fully_preemptive.
Require Import prosa.results.fixed_priority.rta.fully_preemptive.

$DECLARATION_START$
$TASK_SET_DECLARATION$

Let ts : seq Task := $TASK_SET_LIST$.
$CERTIFICATE_START$
Let tsk : Task := $TASK_UNDER_ANALYSIS$.

Let L : duration := $MAX_BUSY_INTERVAL$.
Let SS : seq duration := $SEARCH_SPACE$.
Let SS_size : nat := $SEARCH_SPACE_SIZE$.
$F_SOLUTIONS$
Let R : duration := $RESPONSE_TIME_BOUND$.

$TARDINESS_BOUND_DECLARATION$
$DEADLINE_IS_RESPECTED_START$
Lemma deadline_is_respected : R <= task_deadline tsk.
Proof. by []. Qed.
$DEADLINE_IS_RESPECTED_END$
$TARDINESS_IS_BOUNDED_START$
Lemma tardiness_is_bounded : R - task_deadline tsk <= B.
Proof. by []. Qed.
$TARDINESS_IS_BOUNDED_END$

$DEADLINE_IS_RESPECTED_PRINT_START$
Print deadline_is_respected.
$DEADLINE_IS_RESPECTED_PRINT_END$
$TARDINESS_IS_BOUNDED_PRINT_START$
Print tardiness_is_bounded.
$TARDINESS_IS_BOUNDED_PRINT_END$
";

const TEMPLATE_FP_NP: &str = "(* Certificate for fully non-preemptive fixed-priority scheduling. *)
Require Import prosa.behavior.all.
Require Import prosa.model.processor.ideal.
Require Import prosa.model.task.preemption.fully_nonpreemptive.
Require Import prosa.results.fixed_priority.rta.fully_nonpreemptive.

$DECLARATION_START$
$TASK_SET_DECLARATION$

Let ts : seq Task := $TASK_SET_LIST$.
$CERTIFICATE_START$
Let tsk : Task := $TASK_UNDER_ANALYSIS$.

Let L : duration := $MAX_BUSY_INTERVAL$.
Let SS : seq duration := $SEARCH_SPACE$.
Let SS_size : nat := $SEARCH_SPACE_SIZE$.
$F_SOLUTIONS$
Let R : duration := $RESPONSE_TIME_BOUND$.

$TARDINESS_BOUND_DECLARATION$
$DEADLINE_IS_RESPECTED_START$
Lemma deadline_is_respected : R <= task_deadline tsk.
Proof. by []. Qed.
$DEADLINE_IS_RESPECTED_END$
$TARDINESS_IS_BOUNDED_START$
Lemma tardiness_is_bounded : R - task_deadline tsk <= B.
Proof. by []. Qed.
$TARDINESS_IS_BOUNDED_END$

$DEADLINE_IS_RESPECTED_PRINT_START$
Print deadline_is_respected.
$DEADLINE_IS_RESPECTED_PRINT_END$
$TARDINESS_IS_BOUNDED_PRINT_START$
Print tardiness_is_bounded.
$TARDINESS_IS_BOUNDED_PRINT_END$
";

const TEMPLATE_EDF_FP: &str = "(* Certificate for fully preemptive EDF scheduling. *)
Require Import prosa.behavior.all.
Require Import prosa.model.processor.ideal.
Require Import prosa.model.task.preemption.fully_preemptive.
Require Import prosa.results.edf.rta.fully_preemptive.

$DECLARATION_START$
$TASK_SET_DECLARATION$

Let ts : seq Task := $TASK_SET_LIST$.
$CERTIFICATE_START$
Let tsk : Task := $TASK_UNDER_ANALYSIS$.

Let L : duration := $MAX_BUSY_INTERVAL$.
Let SS : seq duration := $SEARCH_SPACE$.
Let SS_size : nat := $SEARCH_SPACE_SIZE$.
$F_SOLUTIONS$
Let R : duration := $RESPONSE_TIME_BOUND$.

$TARDINESS_BOUND_DECLARATION$
$DEADLINE_IS_RESPECTED_START$
Lemma deadline_is_respected : R <= task_deadline tsk.
Proof. by []. Qed.
$DEADLINE_IS_RESPECTED_END$
$TARDINESS_IS_BOUNDED_START$
Lemma tardiness_is_bounded : R - task_deadline tsk <= B.
Proof. by []. Qed.
$TARDINESS_IS_BOUNDED_END$

$DEADLINE_IS_RESPECTED_PRINT_START$
Print deadline_is_respected.
$DEADLINE_IS_RESPECTED_PRINT_END$
$TARDINESS_IS_BOUNDED_PRINT_START$
Print tardiness_is_bounded.
$TARDINESS_IS_BOUNDED_PRINT_END$
";

const TEMPLATE_EDF_NP: &str = "(* Certificate for fully non-preemptive EDF scheduling. *)
Require Import prosa.behavior.all.
Require Import prosa.model.processor.ideal.
Require Import prosa.model.task.preemption.fully_nonpreemptive.
Require Import prosa.results.edf.rta.fully_nonpreemptive.

$DECLARATION_START$
$TASK_SET_DECLARATION$

Let ts : seq Task := $TASK_SET_LIST$.
$CERTIFICATE_START$
Let tsk : Task := $TASK_UNDER_ANALYSIS$.

Let L : duration := $MAX_BUSY_INTERVAL$.
Let SS : seq duration := $SEARCH_SPACE$.
Let SS_size : nat := $SEARCH_SPACE_SIZE$.
$F_SOLUTIONS$
Let R : duration := $RESPONSE_TIME_BOUND$.

$TARDINESS_BOUND_DECLARATION$
$DEADLINE_IS_RESPECTED_START$
Lemma deadline_is_respected : R <= task_deadline tsk.
Proof. by []. Qed.
$DEADLINE_IS_RESPECTED_END$
$TARDINESS_IS_BOUNDED_START$
Lemma tardiness_is_bounded : R - task_deadline tsk <= B.
Proof. by []. Qed.
$TARDINESS_IS_BOUNDED_END$

$DEADLINE_IS_RESPECTED_PRINT_START$
Print deadline_is_respected.
$DEADLINE_IS_RESPECTED_PRINT_END$
$TARDINESS_IS_BOUNDED_PRINT_START$
Print tardiness_is_bounded.
$TARDINESS_IS_BOUNDED_PRINT_END$
";
