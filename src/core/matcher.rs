//! Complementary skill matching.
//!
//! Both entry points are pure functions over a slice of profiles, normally the
//! `users` of a [`ProfileSnapshot`](crate::domain::model::ProfileSnapshot).
//! Skill names compare by their normalized key, so matching is case- and
//! whitespace-insensitive. Results are deduplicated and deterministically
//! ordered.

use crate::domain::model::{Match, MatchedUser, SkillOffer, SkillRequest, UserId, UserMatch, UserProfile};
use crate::domain::skill::SkillName;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Every `(teacher, learner, skill)` triple with `teacher != learner`, the
/// skill in the teacher's teach-set and in the learner's learn-set.
pub fn find_matches(users: &[UserProfile]) -> Vec<Match> {
    let mut learners_by_skill: HashMap<&SkillName, BTreeSet<UserId>> = HashMap::new();
    for user in users {
        for request in user.learn.iter().filter(|r| !r.skill.is_blank()) {
            learners_by_skill
                .entry(&request.skill)
                .or_default()
                .insert(user.id);
        }
    }

    let mut matches = BTreeSet::new();
    for teacher in users {
        for offer in teacher.teach.iter().filter(|o| !o.skill.is_blank()) {
            let Some(learners) = learners_by_skill.get(&offer.skill) else {
                continue;
            };
            for &learner in learners.iter().filter(|&&id| id != teacher.id) {
                matches.insert(Match {
                    teacher: teacher.id,
                    learner,
                    skill: offer.skill.clone(),
                });
            }
        }
    }

    matches.into_iter().collect()
}

fn distinct_offers(user: &UserProfile) -> BTreeMap<&SkillName, &SkillOffer> {
    let mut offers = BTreeMap::new();
    for offer in user.teach.iter().filter(|o| !o.skill.is_blank()) {
        offers.entry(&offer.skill).or_insert(offer);
    }
    offers
}

fn distinct_requests(user: &UserProfile) -> BTreeMap<&SkillName, &SkillRequest> {
    let mut requests = BTreeMap::new();
    for request in user.learn.iter().filter(|r| !r.skill.is_blank()) {
        requests.entry(&request.skill).or_insert(request);
    }
    requests
}

/// Matches involving `user_id`: first what the user can teach, then what the
/// user can learn. Each group is ordered by skill, then by the other user's id.
/// An unknown id yields no matches.
pub fn matches_for(user_id: UserId, users: &[UserProfile]) -> Vec<UserMatch> {
    let Some(user) = users.iter().find(|u| u.id == user_id) else {
        return Vec::new();
    };

    let mut others: Vec<&UserProfile> = users.iter().filter(|u| u.id != user_id).collect();
    others.sort_by_key(|u| u.id);
    others.dedup_by_key(|u| u.id);

    let mut matches = Vec::new();

    for (skill, offer) in distinct_offers(user) {
        for other in &others {
            if let Some(request) = other.request(skill) {
                matches.push(UserMatch::YouCanTeach {
                    your_skill: offer.skill.clone(),
                    your_skill_level: offer.level,
                    matched_user: MatchedUser::from(*other),
                    their_request: request.description.clone(),
                });
            }
        }
    }

    for (skill, request) in distinct_requests(user) {
        for other in &others {
            if let Some(offer) = other.offer(skill) {
                matches.push(UserMatch::YouCanLearn {
                    skill_you_need: request.skill.clone(),
                    their_skill_level: offer.level,
                    matched_user: MatchedUser::from(*other),
                    their_offer: format!("Can teach {} at {} level", offer.skill, offer.level),
                });
            }
        }
    }

    matches
}
