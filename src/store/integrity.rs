use crate::store::registry::Registry;

/// A broken cross reference between registry entries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// `child.parent_id` names a parent that is missing or does not list the child.
    #[error("composition '{child}' names parent '{parent}' which does not list it")]
    ParentMismatch {
        /// Parent named by the child.
        parent: String,
        /// Child composition.
        child: String,
    },
    /// `parent.nested_ids` lists a child that is missing or points elsewhere.
    #[error("composition '{parent}' lists nested '{child}' which does not point back")]
    NestedMismatch {
        /// Listing composition.
        parent: String,
        /// Listed child.
        child: String,
    },
    /// A composition lists a track that is missing or owned by another composition.
    #[error("composition '{composition}' lists track '{track}' it does not own")]
    TrackNotOwned {
        /// Listing composition.
        composition: String,
        /// Listed track.
        track: String,
    },
    /// A track is not listed by its composition.
    #[error("track '{track}' is missing from composition '{composition}'")]
    OrphanTrack {
        /// Track id.
        track: String,
        /// Composition it claims.
        composition: String,
    },
    /// A track lists a clip that is missing or sits on another track.
    #[error("track '{track}' lists clip '{clip}' it does not hold")]
    ClipNotHeld {
        /// Listing track.
        track: String,
        /// Listed clip.
        clip: String,
    },
    /// A clip is not listed by its track.
    #[error("clip '{clip}' is missing from track '{track}'")]
    OrphanClip {
        /// Clip id.
        clip: String,
        /// Track it claims.
        track: String,
    },
    /// A clip's denormalized composition differs from its track's.
    #[error("clip '{clip}' names composition '{found}' but its track belongs to '{expected}'")]
    ClipComposition {
        /// Clip id.
        clip: String,
        /// Composition of the clip's track.
        expected: String,
        /// Composition stored on the clip.
        found: String,
    },
    /// An id appears twice in a membership list.
    #[error("'{owner}' lists '{member}' more than once")]
    Duplicate {
        /// Owning entity.
        owner: String,
        /// Repeated member.
        member: String,
    },
    /// The root pointer names a missing or nested composition.
    #[error("root '{0}' is missing or has a parent")]
    BadRoot(String),
}

fn duplicates<T: PartialEq + ToString>(owner: &str, ids: &[T], out: &mut Vec<Violation>) {
    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            out.push(Violation::Duplicate {
                owner: owner.to_string(),
                member: id.to_string(),
            });
        }
    }
}

impl Registry {
    /// Verify every cross-reference invariant between compositions, tracks and clips.
    ///
    /// An empty result means the registries are consistent.
    pub fn check_integrity(&self) -> Vec<Violation> {
        let mut out = Vec::new();

        for comp in self.compositions() {
            let cid = comp.id.to_string();
            if let Some(parent_id) = &comp.parent_id {
                let listed = self
                    .composition(parent_id)
                    .is_some_and(|p| p.nested_ids.contains(&comp.id));
                if !listed {
                    out.push(Violation::ParentMismatch {
                        parent: parent_id.to_string(),
                        child: cid.clone(),
                    });
                }
            }
            for child_id in &comp.nested_ids {
                let points_back = self
                    .composition(child_id)
                    .is_some_and(|c| c.parent_id.as_ref() == Some(&comp.id));
                if !points_back {
                    out.push(Violation::NestedMismatch {
                        parent: cid.clone(),
                        child: child_id.to_string(),
                    });
                }
            }
            for track_id in &comp.track_ids {
                let owned = self
                    .track(track_id)
                    .is_some_and(|t| t.composition_id == comp.id);
                if !owned {
                    out.push(Violation::TrackNotOwned {
                        composition: cid.clone(),
                        track: track_id.to_string(),
                    });
                }
            }
            duplicates(&cid, &comp.nested_ids, &mut out);
            duplicates(&cid, &comp.track_ids, &mut out);
        }

        for track in self.tracks() {
            let tid = track.id.to_string();
            let listed = self
                .composition(&track.composition_id)
                .is_some_and(|c| c.track_ids.contains(&track.id));
            if !listed {
                out.push(Violation::OrphanTrack {
                    track: tid.clone(),
                    composition: track.composition_id.to_string(),
                });
            }
            for clip_id in &track.clip_ids {
                let held = self.clip(clip_id).is_some_and(|c| c.track_id == track.id);
                if !held {
                    out.push(Violation::ClipNotHeld {
                        track: tid.clone(),
                        clip: clip_id.to_string(),
                    });
                }
            }
            duplicates(&tid, &track.clip_ids, &mut out);
        }

        for clip in self.clips() {
            match self.track(&clip.track_id) {
                Some(track) => {
                    if !track.clip_ids.contains(&clip.id) {
                        out.push(Violation::OrphanClip {
                            clip: clip.id.to_string(),
                            track: clip.track_id.to_string(),
                        });
                    }
                    if track.composition_id != clip.composition_id {
                        out.push(Violation::ClipComposition {
                            clip: clip.id.to_string(),
                            expected: track.composition_id.to_string(),
                            found: clip.composition_id.to_string(),
                        });
                    }
                }
                None => out.push(Violation::OrphanClip {
                    clip: clip.id.to_string(),
                    track: clip.track_id.to_string(),
                }),
            }
        }

        if let Some(root) = &self.root {
            let ok = self
                .composition(root)
                .is_some_and(|c| c.parent_id.is_none());
            if !ok {
                out.push(Violation::BadRoot(root.to_string()));
            }
        }

        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/integrity.rs"]
mod tests;
