use rosu_map::util::Pos;

use super::osu_object::OsuObject;

const STACK_DISTANCE: f32 = 3.0;

/// Assign stack heights to objects that are close in both time and space.
///
/// Positions must not contain a stack offset yet.
pub(crate) fn apply_stacking(objects: &mut [OsuObject], time_preempt: f64, stack_leniency: f32) {
    let stack_threshold = time_preempt * f64::from(stack_leniency);

    for h in objects.iter_mut() {
        h.stack_height = 0;
    }

    for i in (1..objects.len()).rev() {
        if objects[i].stack_height != 0 || objects[i].is_spinner() {
            continue;
        }

        let mut n = i;
        let mut curr = i;

        if objects[curr].is_circle() {
            while n > 0 {
                n -= 1;

                if objects[n].is_spinner() {
                    continue;
                }

                if objects[curr].start_time - objects[n].end_time() > stack_threshold {
                    break;
                }

                if objects[n].is_slider() {
                    let end_pos = objects[n].end_pos();

                    if is_stacked(end_pos, objects[curr].pos) {
                        let offset = objects[curr].stack_height - objects[n].stack_height + 1;

                        for h in objects[n + 1..=i].iter_mut() {
                            // Objects stacked on the slider end are moved down
                            if is_stacked(end_pos, h.pos) {
                                h.stack_height -= offset;
                            }
                        }

                        break;
                    }
                }

                if is_stacked(objects[n].pos, objects[curr].pos) {
                    objects[n].stack_height = objects[curr].stack_height + 1;
                    curr = n;
                }
            }
        } else if objects[curr].is_slider() {
            while n > 0 {
                n -= 1;

                if objects[n].is_spinner() {
                    continue;
                }

                if objects[curr].start_time - objects[n].start_time > stack_threshold {
                    break;
                }

                if is_stacked(objects[n].end_pos(), objects[curr].pos) {
                    objects[n].stack_height = objects[curr].stack_height + 1;
                    curr = n;
                }
            }
        }
    }
}

/// Stacking for maps below format version 6.
///
/// Each object counts the later objects on top of it. Objects on a slider's
/// path end are pushed down instead.
pub(crate) fn apply_stacking_old(
    objects: &mut [OsuObject],
    time_preempt: f64,
    stack_leniency: f32,
) {
    let stack_threshold = time_preempt * f64::from(stack_leniency);

    for h in objects.iter_mut() {
        h.stack_height = 0;
    }

    for i in 0..objects.len() {
        if objects[i].stack_height != 0 && !objects[i].is_slider() {
            continue;
        }

        let pos = objects[i].pos;
        let path_end = objects[i].pos + objects[i].path_end_offset();
        let mut start_time = objects[i].end_time();
        let mut slider_stack = 0;

        for j in i + 1..objects.len() {
            if objects[j].start_time - stack_threshold > start_time {
                break;
            }

            if is_stacked(objects[j].pos, pos) {
                objects[i].stack_height += 1;
                start_time = objects[j].start_time;
            } else if is_stacked(objects[j].pos, path_end) {
                slider_stack += 1;
                objects[j].stack_height -= slider_stack;
                start_time = objects[j].start_time;
            }
        }
    }
}

fn is_stacked(a: Pos, b: Pos) -> bool {
    (a - b).length() < STACK_DISTANCE
}
