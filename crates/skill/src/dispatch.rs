use std::fmt;

use plantfacts_core::intent::{
    CANCEL_INTENT, FALLBACK_INTENT, HELLO_WORLD_INTENT, HELP_INTENT, PLANT_FACT_INTENT,
    STOP_INTENT,
};
use plantfacts_core::{
    intent_name, is_intent, is_intent_in, is_launch, is_session_ended, InboundRequest,
    OutboundResponse, SkillError,
};
use tracing::debug;

use crate::handlers;
use crate::input::HandlerInput;

pub type HandlerResult = Result<OutboundResponse, SkillError>;
pub type Predicate = fn(&InboundRequest) -> bool;
pub type Handle = fn(&HandlerInput<'_>) -> HandlerResult;

/// A handler together with the predicate that selects it.
#[derive(Clone, Copy)]
pub struct Route {
    pub name: &'static str,
    pub can_handle: Predicate,
    pub handle: Handle,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("name", &self.name).finish()
    }
}

/// Handler priority. Intent predicates overlap (every intent request also
/// matches the reflector), so the order here is the only tie-breaker.
pub const STANDARD_ROUTES: [Route; 8] = [
    Route {
        name: "LaunchRequestHandler",
        can_handle: is_launch,
        handle: handlers::launch,
    },
    Route {
        name: "HelloWorldIntentHandler",
        can_handle: is_hello_world,
        handle: handlers::hello_world,
    },
    Route {
        name: "HelpIntentHandler",
        can_handle: is_help,
        handle: handlers::help,
    },
    Route {
        name: "CancelAndStopIntentHandler",
        can_handle: is_cancel_or_stop,
        handle: handlers::cancel_and_stop,
    },
    Route {
        name: "FallbackIntentHandler",
        can_handle: is_fallback,
        handle: handlers::fallback,
    },
    Route {
        name: "SessionEndedRequestHandler",
        can_handle: is_session_ended,
        handle: handlers::session_ended,
    },
    Route {
        name: "PlantFactIntentHandler",
        can_handle: is_plant_fact,
        handle: handlers::plant_fact,
    },
    Route {
        name: "IntentReflectorHandler",
        can_handle: is_any_intent,
        handle: handlers::intent_reflector,
    },
];

#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Vec<Route>,
}

impl Dispatcher {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_ROUTES.to_vec())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route whose predicate accepts the request.
    pub fn route_for(&self, request: &InboundRequest) -> Option<&Route> {
        self.routes.iter().find(|route| (route.can_handle)(request))
    }

    pub fn dispatch(&self, input: &HandlerInput<'_>) -> HandlerResult {
        let request = input.request();
        let route = self
            .route_for(request)
            .ok_or_else(|| SkillError::NoHandler {
                request_type: request.request_type().to_string(),
            })?;

        debug!(handler = route.name, "dispatching request");
        (route.handle)(input)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_hello_world(request: &InboundRequest) -> bool {
    is_intent(request, HELLO_WORLD_INTENT)
}

fn is_help(request: &InboundRequest) -> bool {
    is_intent(request, HELP_INTENT)
}

fn is_cancel_or_stop(request: &InboundRequest) -> bool {
    is_intent_in(request, &[CANCEL_INTENT, STOP_INTENT])
}

fn is_fallback(request: &InboundRequest) -> bool {
    is_intent(request, FALLBACK_INTENT)
}

fn is_plant_fact(request: &InboundRequest) -> bool {
    is_intent(request, PLANT_FACT_INTENT)
}

fn is_any_intent(request: &InboundRequest) -> bool {
    intent_name(request).is_some()
}
