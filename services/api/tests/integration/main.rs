
mod recipe_test;
mod router_test;
